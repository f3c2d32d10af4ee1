//! 错误类型定义
//!
//! 分为两类：构造解析器时的配置错误（致命），以及批量解析过程中单行的解析错误（非致命，
//! 只会被汇总进 [`PartialFailure`](crate::parser::PartialFailure)）。

use crate::record_types::FieldKind;
use thiserror::Error;

/// 配置错误
///
/// 在构造解析器时返回，出现任意一个即构造失败，不存在“部分构造”的解析器。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 字段顺序中缺少必需字段（date 或 time）
    #[error("log headers must contain `{0}`")]
    MissingField(FieldKind),

    /// date 与 time 必须相邻且 date 在前
    #[error("`date` must be immediately followed by `time` in log headers")]
    DateTimeNotAdjacent,

    /// 同一字段出现多次
    #[error("field `{0}` appears more than once in log headers")]
    DuplicateField(FieldKind),

    /// prefix 只能出现在 date 之前
    #[error("`prefix` must appear before `date` in log headers")]
    PrefixNotLeading,

    /// 无法识别的字段名
    #[error("unknown log header field: '{0}'")]
    UnknownField(String),

    /// 解析器类型不匹配
    #[error("unsupported parser type '{0}', expected 'qiniulog'")]
    UnsupportedParserType(String),

    /// 布尔型配置项取值非法
    #[error("invalid boolean for '{key}': '{value}'")]
    InvalidBool {
        /// 配置键
        key: String,
        /// 原始取值
        value: String,
    },

    /// 行首正则编译失败
    #[error("failed to compile head pattern: {0}")]
    InvalidPattern(String),
}

/// 单行解析错误
///
/// 只描述“这一行为什么没能进入任何记录”，不会中断批量解析。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 空行（或仅含空白字符）
    #[error("empty line")]
    EmptyLine,

    /// 非行首行，且当前没有可以追加的记录
    #[error("line does not match log head and no record is open: {line}")]
    NoOpenRecord {
        /// 原始行内容
        line: String,
    },
}
