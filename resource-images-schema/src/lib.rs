//! Wire types for the libSQL remote protocol (Hrana over HTTP, v2 pipeline).

pub mod pipeline;
pub mod value;

pub use pipeline::{
    Col, PipelineRequest, PipelineResponse, Stmt, StmtResult, StreamError, StreamRequest,
    StreamResponse, StreamResult,
};
pub use value::Value;
