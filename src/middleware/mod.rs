pub mod request_context;

pub use request_context::{
    make_span_with_request_context, request_context_middleware, CurrentUser, RequestContext,
};
