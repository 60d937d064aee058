mod request;
mod response;

pub use request::{PipelineRequest, Stmt, StreamRequest};
pub use response::{Col, PipelineResponse, StmtResult, StreamError, StreamResponse, StreamResult};
