/// Sport and provenance constants shared by the pipeline and the output adapter.

// Sport labels as they appear in the output table
pub const INDOOR_TRACK: &str = "Indoor Track & Field";
pub const OUTDOOR_TRACK: &str = "Outdoor Track & Field";
pub const CROSS_COUNTRY: &str = "Cross Country";

// Gender codes
pub const MEN: &str = "M";
pub const WOMEN: &str = "W";

/// Provenance stamped on every output row
pub const SOURCE_LABEL: &str = "NCAA Sponsorship XLSX";

// Run defaults, overridable through config.toml
pub const DEFAULT_INPUT_PATH: &str = "data/RES_ProjectedSportsSponsorshipbySchool.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "data/ncaa_track_programs.csv";
pub const DEFAULT_DATA_YEAR: u16 = 2025;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "NCAA_SPONSORSHIP_CONFIG";

/// Output header, in the field order of `SponsorshipRecord`
pub const OUTPUT_HEADER: [&str; 8] = [
    "school_name",
    "school_short_name",
    "division",
    "conference",
    "sport",
    "gender",
    "data_year",
    "source",
];

/// Division bucket used in the breakdown when a record has no division
pub const UNKNOWN_DIVISION: &str = "Unknown";
