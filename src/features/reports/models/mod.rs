mod report;

pub use report::{
    NewReport, NewReportImage, Report, ReportImage, ReportImageMeta, ReportStatus, StatusCounts,
};
