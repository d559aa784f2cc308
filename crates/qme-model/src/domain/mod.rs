mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;
