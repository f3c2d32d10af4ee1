//! 核心解析函数
//!
//! 单行的分类与字段提取（纯函数），以及向记录追加继续行。

use crate::matcher::HeadMatcher;
use crate::parser::record::Record;
use crate::tools::{fold_lines, normalize_time};

/// 尝试把一行解析为记录起始行
///
/// 匹配成功时返回新记录，`log` 以行首之后的内容作为第一段；匹配失败返回 `None`，
/// 这本身不是错误，由调用方决定该行是继续行还是失败行。
///
/// # 参数
///
/// * `matcher` - 编译好的行首匹配器
/// * `line` - 原始行（可以内含换行）
/// * `zone_suffix` - 追加到时间后的时区后缀
pub(crate) fn parse_head(matcher: &HeadMatcher, line: &str, zone_suffix: &str) -> Option<Record> {
    let head = matcher.captures(line)?;

    Some(Record {
        time: normalize_time(head.date, head.time, zone_suffix),
        reqid: head.reqid.to_string(),
        level: head.level.to_string(),
        file: head.file.to_string(),
        log: fold_lines(head.remainder),
    })
}

/// 把继续行追加到记录正文，片段之间以单个空格分隔
#[inline]
pub(crate) fn append_continuation(record: &mut Record, line: &str) {
    let fragment = fold_lines(line);
    if fragment.is_empty() {
        return;
    }
    if !record.log.is_empty() {
        record.log.push(' ');
    }
    record.log.push_str(&fragment);
}
