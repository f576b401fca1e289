use std::path::PathBuf;

use crate::args::DriverArgs;

#[derive(Debug, Clone, Default)]
pub struct ReportSinks {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

impl ReportSinks {
    #[must_use]
    pub fn from_args(args: &DriverArgs) -> Self {
        Self {
            csv: args.export_csv.as_deref().map(PathBuf::from),
            json: args.export_json.as_deref().map(PathBuf::from),
        }
    }
}
