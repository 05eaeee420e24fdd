pub const ASSAY_DISPLAY_VERSION: &str = env!("ASSAY_DISPLAY_VERSION");
pub const ASSAY_BUILD_N: &str = env!("ASSAY_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "Assay Planner {}\nBuild {}\nProtocol {}\n96-well plate maps, dilutions and reagent volumes",
        ASSAY_DISPLAY_VERSION,
        ASSAY_BUILD_N,
        assay_protocol::PROTOCOL_VERSION
    )
}
