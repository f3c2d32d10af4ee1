//! 解析器使用的常量定义
//!
//! 包括每种行首字段的子模式（字段模式库）、日志级别集合以及配置键名。

use once_cell::sync::Lazy;

// 字段子模式
//
// 只描述捕获组内部的内容；方括号等外层定界符以及捕获组名由 matcher 按 schema 拼接。
// 正则引擎默认按 Unicode 解释 `\d`、`\w`、`\s`，这里一律写成 ASCII 字符类。

/// 日期：四位年份 / 一或两位月 / 一或两位日，只接受 `/` 分隔
pub const DATE_BODY: &str = r"[1-9][0-9]{3}/[01]?[0-9]/[0-3]?[0-9]";

/// 时间：`HH:MM:SS`，可选 `.` 加恰好 6 位微秒
pub const TIME_BODY: &str = r"[0-2][0-9]:[0-5][0-9]:[0-6][0-9](?:\.[0-9]{6})?";

/// 请求 ID：ASCII 单词字符与 `-`，允许为空
pub const REQID_BODY: &str = r"[0-9A-Za-z_-]*";

/// 文件位置的单个 `path:lineno:` 片段
const FILE_SEGMENT: &str = r#"[^\s\[\]":]+:[0-9]+:"#;

/// 带引号并用方括号包围的文件位置：`["github.com/x/logger.go:75"]`
pub const FILE_QUOTED_BODY: &str = r#"\["[^"\r\n]*"\]"#;

/// 裸写的文件位置：可选的一个前导 token，然后是 `path:lineno:`，
/// 后面可以用 `==>` 串联更多 `path:lineno:` 片段
pub static FILE_BARE_BODY: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(?:[^\s\[\]":]+ )?{seg}(?:[ \t]+==>[ \t]+{seg})*"#,
        seg = FILE_SEGMENT
    )
});

/// 字段之间必须出现的分隔：空格或制表符，不跨行
pub const FIELD_SEPARATOR: &str = r"[ \t]+";

/// 紧贴在方括号字段之后时分隔可以省略，如 `[id][INFO]`
pub const BRACKET_SEPARATOR: &str = r"[ \t]*";

/// 日志级别集合
pub const LEVELS: [&str; 8] = [
    "TRACE", "DEBUG", "INFO", "WARN", "ERROR", "FATAL", "PANIC", "STACK",
];

/// 日志级别：封闭集合取值
pub static LEVEL_BODY: Lazy<String> = Lazy::new(|| LEVELS.join("|"));

/// 行首结束位置：空白或行尾，其后全部作为消息正文
pub const HEAD_TERMINATOR: &str = r"(?:[ \t\r\n]+|$)(?P<log>.*)";

/// 正文捕获组名
pub const LOG_GROUP: &str = "log";

// 配置键

/// 解析器名称
pub const KEY_PARSER_NAME: &str = "name";

/// 解析器类型
pub const KEY_PARSER_TYPE: &str = "type";

/// 行首字段顺序（逗号分隔）
pub const KEY_LOG_HEADERS: &str = "qiniulog_log_headers";

/// 字面前缀
pub const KEY_PREFIX: &str = "qiniulog_prefix";

/// 是否丢弃无法解析的行（不生成降级记录）
pub const KEY_DISABLE_RECORD_ERRDATA: &str = "disable_record_errdata";

/// 解析器类型名，用于在解析器注册表中登记
pub const PARSER_TYPE: &str = "qiniulog";

/// 默认字段顺序
pub const DEFAULT_LOG_HEADERS: &str = "prefix,date,time,reqid,level,file";
