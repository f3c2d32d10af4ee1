//! # Qiniulog Parser
//!
//! 七牛风格应用日志的结构化解析库：给定一批原始文本行，重建出一条条日志记录
//! （时间、请求 ID、级别、源文件位置、消息）。
//!
//! ## 功能特性
//!
//! - **可配置的行首格式**: 按字段顺序声明行首布局，构造时编译为一个正则，之后只读复用
//! - **多行拼接**: 不匹配行首的行自动追加到上一条记录的消息中
//! - **部分失败**: 无法解析的行只计数（可选保留为降级记录），从不中断整个批次
//! - **可并发复用**: 同一个解析器可被多个线程同时调用
//!
//! ## 快速开始
//!
//! ```rust
//! use qiniulog_parser::{ParserConfig, QiniulogParser};
//!
//! let parser = QiniulogParser::new(ParserConfig::default()).unwrap();
//! let output = parser.parse(&[
//!     "2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608",
//!     "2016/10/20 18:20:30.642666 [ERROR] github.com/qiniu/logkit/queue/disk.go:241: readOne() error",
//! ]);
//!
//! for record in &output.records {
//!     println!("{} [{}] {}", record.time, record.level, record.log);
//! }
//! assert_eq!(output.records[1].level, "ERROR");
//! ```
//!
//! ### 从配置表构造
//!
//! ```rust
//! use qiniulog_parser::QiniulogParser;
//! use std::collections::HashMap;
//!
//! let conf: HashMap<String, String> = [
//!     ("name", "qiniulogparser"),
//!     ("type", "qiniulog"),
//!     ("qiniulog_log_headers", "prefix,date,time,level,reqid,file"),
//!     ("qiniulog_prefix", "QINIU"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let parser = QiniulogParser::from_map(&conf).unwrap();
//! assert_eq!(parser.name(), "qiniulogparser");
//! assert!(parser.is_head("QINIU 2017/01/22 12:14:14.072180 [ERROR][SLdoIlbiqLnL_JsU] hello"));
//! assert!(!parser.is_head("2017/01/22 12:14:14.072180 [ERROR][SLdoIlbiqLnL_JsU] hello"));
//! ```
//!
//! ## 日志格式
//!
//! 默认字段顺序 `prefix,date,time,reqid,level,file`：
//!
//! ```text
//! 2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608
//! ```
//!
//! 字段顺序 `prefix,date,time,level,reqid,file`，文件位置带引号：
//!
//! ```text
//! 2017/01/22 11:16:08.885550 [INFO][2pyKMgVp5EKg-ZsU]["github.com/teapots/request-logger/logger.go:75"] [REQ_END] 200
//! ```

pub mod error;
pub mod matcher;
pub mod parser;
pub mod parser_config;
pub mod record_types;
pub mod tools;

pub use error::{ConfigError, ParseError};
pub use matcher::{HeadFields, HeadMatcher};
pub use parser::{
    LogParser, ParseOutput, PartialFailure, QiniulogParser, Record, parse_batches, parse_lines,
};
pub use parser::constants::PARSER_TYPE;
pub use parser_config::ParserConfig;
pub use record_types::{FieldKind, Schema};
