mod tiantian;

pub use tiantian::{parse_estimate, unwrap_jsonp, TiantianSource};
