//! 文本工具函数
//!
//! 时区后缀的解析、时间字符串的规范化，以及消息正文的折叠。

use chrono::Local;
use memchr::memchr3;
use once_cell::sync::Lazy;

/// 进程级时区后缀，首次使用时根据本机时区计算一次
static LOCAL_ZONE_SUFFIX: Lazy<String> = Lazy::new(|| format!(" {}", Local::now().offset()));

/// 本机时区后缀，形如 `" +08:00"`
///
/// 整个进程只计算一次，之后返回同一个字符串。
pub fn local_zone_suffix() -> &'static str {
    LOCAL_ZONE_SUFFIX.as_str()
}

/// 拼接日期、时间与时区后缀
///
/// 纯文本操作，不做任何时间换算。
///
/// ```
/// use qiniulog_parser::tools::normalize_time;
///
/// assert_eq!(
///     normalize_time("2016/10/20", "17:30:21.433423", " +08:00"),
///     "2016/10/20 17:30:21.433423 +08:00"
/// );
/// ```
pub fn normalize_time(date: &str, time: &str, zone_suffix: &str) -> String {
    let mut out = String::with_capacity(date.len() + 1 + time.len() + zone_suffix.len());
    out.push_str(date);
    out.push(' ');
    out.push_str(time);
    out.push_str(zone_suffix);
    out
}

/// 把一段可能内含换行的文本折叠成单行
///
/// 按 `\n`、`\r` 切分成物理行，每行去掉 `\t` 并裁掉首尾空白，丢弃空行，
/// 再以单个空格拼接。不含这三种字符时只做首尾裁剪。
pub fn fold_lines(text: &str) -> String {
    if memchr3(b'\n', b'\r', b'\t', text.as_bytes()).is_none() {
        return text.trim().to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut piece = String::new();
    for line in text.split(['\n', '\r']) {
        piece.clear();
        piece.extend(line.chars().filter(|c| *c != '\t'));
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    out
}

/// 是否为空行（空串或只含空白字符）
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
