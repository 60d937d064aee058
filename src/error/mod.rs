mod report;

pub use report::ReportError;
