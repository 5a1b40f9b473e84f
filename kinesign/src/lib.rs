#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use kinesign_core::*;

#[cfg(feature = "default-http-send")]
pub use kinesign_http_send_reqwest::ReqwestHttpSend;

#[cfg(feature = "aws")]
pub mod aws;
