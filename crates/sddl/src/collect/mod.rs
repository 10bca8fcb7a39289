pub mod constant;
pub mod message;
pub mod rpc;
pub mod typedef;
