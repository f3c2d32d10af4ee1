//! 便捷 API 函数
//!
//! 提供一次性构造并解析的入口，以及多批次并行解析。

use crate::error::ConfigError;
use crate::parser::qiniulog_parser::{ParseOutput, QiniulogParser};
use rayon::prelude::*;
use std::collections::HashMap;

/// 按配置表构造解析器并解析一个批次
///
/// 适合只解析一次的场景；需要反复解析时应复用 [`QiniulogParser`]，避免重复编译匹配器。
///
/// # 示例
///
/// ```
/// use qiniulog_parser::parse_lines;
/// use std::collections::HashMap;
///
/// let mut conf = HashMap::new();
/// conf.insert("disable_record_errdata".to_string(), "true".to_string());
///
/// let output = parse_lines(&conf, &["2017/03/28 15:41:06 [INFO] bdc.go:573: ok", ""])?;
/// assert_eq!(output.records.len(), 1);
/// assert_eq!(output.error_count(), 1);
/// # Ok::<(), qiniulog_parser::ConfigError>(())
/// ```
pub fn parse_lines<S: AsRef<str>>(
    conf: &HashMap<String, String>,
    lines: &[S],
) -> Result<ParseOutput, ConfigError> {
    let parser = QiniulogParser::from_map(conf)?;
    Ok(parser.parse(lines))
}

/// 用同一个解析器并行解析多个互不相关的批次
///
/// 每个批次独立拼接，记录不会跨批次合并；输出顺序与输入批次顺序一致。
pub fn parse_batches<B, S>(parser: &QiniulogParser, batches: &[B]) -> Vec<ParseOutput>
where
    B: AsRef<[S]> + Sync,
    S: AsRef<str> + Sync,
{
    batches
        .par_iter()
        .map(|batch| parser.parse(batch.as_ref()))
        .collect()
}
