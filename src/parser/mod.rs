//! Parser 模块 - 解析七牛风格的应用日志
//!
//! 此模块提供了完整的日志解析功能,包括:
//! - Record 结构
//! - 单行分类与字段提取
//! - 多行拼接与部分失败统计
//! - 便捷 API 函数

mod api;
pub mod constants;
pub(crate) mod parse_functions;
pub mod qiniulog_parser;
pub mod record;
pub(crate) mod record_parser;
pub mod stats;

pub use api::{parse_batches, parse_lines};
pub use qiniulog_parser::{LogParser, ParseOutput, QiniulogParser};
pub use record::Record;
pub use stats::PartialFailure;
