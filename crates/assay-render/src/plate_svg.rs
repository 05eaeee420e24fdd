use assay_engine::{COLUMN_COUNT, Coordinate, Plate, ROW_LABELS, WellKind};
use std::collections::BTreeMap;
use svg::Document;
use svg::node::element::{Circle, Rectangle, Text};

const CELL: f32 = 64.0;
const GRID_LEFT: f32 = 60.0;
const GRID_TOP: f32 = 90.0;
const LEGEND_TOP: f32 = GRID_TOP + CELL * ROW_LABELS.len() as f32 + 30.0;
const SVG_WIDTH: f32 = GRID_LEFT + CELL * COLUMN_COUNT as f32 + 40.0;

const ARTICLE_PALETTE: [&str; 8] = [
    "#2563eb", "#16a34a", "#d97706", "#9333ea", "#0891b2", "#db2777", "#65a30d", "#7c3aed",
];

fn kind_fill(kind: WellKind) -> &'static str {
    match kind {
        WellKind::NegativeControl => "#6b7280",
        WellKind::LiveDeadControl => "#dc2626",
        WellKind::UnstainedControl => "#e5e7eb",
        WellKind::TestArticle => "#2563eb",
    }
}

/// Assigns each distinct label a colour, in order of first appearance.
fn label_colours(plate: &Plate) -> BTreeMap<String, &'static str> {
    let mut colours = BTreeMap::new();
    let mut next_article = 0usize;
    for well in &plate.wells {
        if colours.contains_key(&well.test_article) {
            continue;
        }
        let kind = WellKind::classify(&well.test_article);
        let fill = if kind.is_control() {
            kind_fill(kind)
        } else {
            let fill = ARTICLE_PALETTE[next_article % ARTICLE_PALETTE.len()];
            next_article += 1;
            fill
        };
        colours.insert(well.test_article.clone(), fill);
    }
    colours
}

fn short_label(label: &str) -> String {
    match WellKind::classify(label) {
        WellKind::NegativeControl => "NEG".to_string(),
        WellKind::LiveDeadControl => "L/D".to_string(),
        WellKind::UnstainedControl => "UNS".to_string(),
        WellKind::TestArticle => {
            let skip = label.chars().count().saturating_sub(6);
            label.chars().skip(skip).collect()
        }
    }
}

/// Renders one plate as an 8×12 well grid with a colour legend.
pub fn export_plate_svg(plate: &Plate) -> String {
    let colours = label_colours(plate);
    let legend_rows = colours.len().div_ceil(3).max(1);
    let height = LEGEND_TOP + legend_rows as f32 * 22.0 + 20.0;

    let mut doc = Document::new()
        .set("viewBox", (0, 0, SVG_WIDTH, height))
        .set("width", SVG_WIDTH)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", SVG_WIDTH)
                .set("height", height)
                .set("fill", "#f9fafb"),
        )
        .add(
            Text::new(format!("{} | replicates: {}", plate.title(), plate.replicates.get()))
                .set("x", GRID_LEFT)
                .set("y", 40.0)
                .set("font-family", "monospace")
                .set("font-size", 16)
                .set("fill", "#0f172a"),
        );

    for column in 1..=COLUMN_COUNT {
        doc = doc.add(
            Text::new(column.to_string())
                .set("x", GRID_LEFT + CELL * (column as f32 - 0.5))
                .set("y", GRID_TOP - 12.0)
                .set("text-anchor", "middle")
                .set("font-family", "monospace")
                .set("font-size", 13)
                .set("fill", "#334155"),
        );
    }

    for (row_idx, row) in ROW_LABELS.iter().enumerate() {
        let cy = GRID_TOP + CELL * (row_idx as f32 + 0.5);
        doc = doc.add(
            Text::new(row.to_string())
                .set("x", GRID_LEFT - 20.0)
                .set("y", cy + 5.0)
                .set("text-anchor", "middle")
                .set("font-family", "monospace")
                .set("font-size", 13)
                .set("fill", "#334155"),
        );
        for column in 1..=COLUMN_COUNT {
            let cx = GRID_LEFT + CELL * (column as f32 - 0.5);
            let well = Coordinate::new(row_idx, column).and_then(|at| plate.well_at(at));
            let (fill, stroke) = match well {
                Some(w) => (
                    colours.get(&w.test_article).copied().unwrap_or("#2563eb"),
                    "#1f2937",
                ),
                None => ("#ffffff", "#cbd5e1"),
            };
            doc = doc.add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", CELL * 0.42)
                    .set("fill", fill)
                    .set("stroke", stroke)
                    .set("stroke-width", 1.5),
            );
            if let Some(w) = well {
                doc = doc.add(
                    Text::new(short_label(&w.test_article))
                        .set("x", cx)
                        .set("y", cy + 4.0)
                        .set("text-anchor", "middle")
                        .set("font-family", "monospace")
                        .set("font-size", 10)
                        .set("fill", "#111827"),
                );
            }
        }
    }

    for (idx, (label, fill)) in colours.iter().enumerate() {
        let x = GRID_LEFT + (idx % 3) as f32 * 260.0;
        let y = LEGEND_TOP + (idx / 3) as f32 * 22.0;
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y - 11.0)
                    .set("width", 14)
                    .set("height", 14)
                    .set("fill", *fill)
                    .set("stroke", "#1f2937"),
            )
            .add(
                Text::new(label.clone())
                    .set("x", x + 22.0)
                    .set("y", y)
                    .set("font-family", "monospace")
                    .set("font-size", 12)
                    .set("fill", "#111827"),
            );
    }

    doc.to_string()
}
