//! 行首匹配器
//!
//! 把 [`Schema`] 编译成一个锚定在行首的正则，每个字段一个命名捕获组，外加一个捕获行首之后
//! 全部内容的 `log` 组。编译只在构造解析器时进行一次，结果不可变，可在多个线程间共享。
//!
//! 除 date、time 外的字段都是可选的，缺席时捕获组不参与匹配，取值为空串。
//!
//! schema 中相邻的方括号字段（reqid、level）构成一个“方括号段”。正则引擎不支持环视，
//! 所以方括号段被编译成按优先级排列的候选组合：字段多的组合在前，字段数相同时含封闭集合
//! 字段的组合在前。每个候选组合使用各自的捕获组别名（如 `level_1`），提取时取第一个参与
//! 匹配的别名。这样 `[id][INFO]` 两个字段都能认领，而单独的 `[ERROR]` 落在 level 槽位，
//! 单独的 `[123]` 落在 reqid 槽位。
//!
//! 字段之间只接受空格或制表符作为分隔，行首不会跨越内嵌的换行；只有两侧都是方括号时
//! （如 `[id][INFO]`、`[INFO]["a.go:1"]`）分隔才可以省略。

use crate::error::ConfigError;
use crate::parser::constants::{
    BRACKET_SEPARATOR, DATE_BODY, FIELD_SEPARATOR, FILE_BARE_BODY, FILE_QUOTED_BODY,
    HEAD_TERMINATOR, LEVEL_BODY, LOG_GROUP, REQID_BODY, TIME_BODY,
};
use crate::record_types::{FieldKind, Schema};
use regex::{Captures, Regex};
use std::cmp::Reverse;

/// 一次成功匹配提取出的行首字段
///
/// 未参与匹配的可选字段为空串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub level: &'a str,
    pub reqid: &'a str,
    pub file: &'a str,
    /// 行首之后的全部内容，作为消息正文的第一段
    pub remainder: &'a str,
}

/// 编译后的行首匹配器
#[derive(Debug, Clone)]
pub struct HeadMatcher {
    regex: Regex,
    /// 字段种类 -> 捕获组名（同一字段可能有多个别名）
    groups: Vec<(FieldKind, String)>,
}

impl HeadMatcher {
    /// 按 schema 编译匹配器
    pub fn compile(schema: &Schema) -> Result<Self, ConfigError> {
        let mut builder = PatternBuilder::default();
        builder.build(schema);

        let regex =
            Regex::new(&builder.pattern).map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            regex,
            groups: builder.groups,
        })
    }

    /// 编译后的正则源码
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// 判断一行是否为记录起始行
    pub fn is_head(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// 尝试从行首匹配，成功时返回提取出的字段
    pub fn captures<'a>(&self, line: &'a str) -> Option<HeadFields<'a>> {
        let caps = self.regex.captures(line)?;
        let mut fields = HeadFields::default();

        for (kind, name) in &self.groups {
            let Some(m) = caps.name(name) else {
                continue;
            };
            let slot = match kind {
                FieldKind::Date => &mut fields.date,
                FieldKind::Time => &mut fields.time,
                FieldKind::Level => &mut fields.level,
                FieldKind::Reqid => &mut fields.reqid,
                FieldKind::File => &mut fields.file,
                FieldKind::Prefix => continue,
            };
            if slot.is_empty() {
                *slot = m.as_str();
            }
        }

        fields.file = unbracket_file(fields.file);
        fields.remainder = group(&caps, LOG_GROUP);
        Some(fields)
    }
}

/// 可选字段的分隔符放在字段之前（date 之后的字段）还是之后（date 之前的字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Leading,
    Trailing,
}

impl Side {
    fn join(self, sep: &str, body: &str) -> String {
        match self {
            Side::Leading => format!("{}{}", sep, body),
            Side::Trailing => format!("{}{}", body, sep),
        }
    }
}

/// 与相邻字段之间的分隔：两侧都可能是方括号时允许省略，否则至少一个空格或制表符
fn separator_next_to(neighbour: Option<FieldKind>) -> &'static str {
    match neighbour {
        Some(FieldKind::Level | FieldKind::Reqid | FieldKind::File) => BRACKET_SEPARATOR,
        _ => FIELD_SEPARATOR,
    }
}

/// 正则源码拼接器
#[derive(Default)]
struct PatternBuilder {
    pattern: String,
    groups: Vec<(FieldKind, String)>,
}

impl PatternBuilder {
    fn build(&mut self, schema: &Schema) {
        let prefix = schema.prefix().map(|p| format!("{} ", regex::escape(p)));
        let mut prefix_placed = false;
        let mut date_seen = false;
        let fields = schema.fields();

        self.pattern.push_str("(?s)^");

        let mut i = 0;
        while i < fields.len() {
            let kind = fields[i];
            let run = if kind.is_bracketed() {
                fields[i..].iter().take_while(|k| k.is_bracketed()).count()
            } else {
                1
            };
            // date 之后看前一个字段，date 之前看后一个字段
            let (side, neighbour) = if date_seen {
                (Side::Leading, i.checked_sub(1).map(|j| fields[j]))
            } else {
                (Side::Trailing, fields.get(i + run).copied())
            };

            match kind {
                FieldKind::Prefix => {
                    if let Some(p) = &prefix {
                        self.pattern.push_str(p);
                        prefix_placed = true;
                    }
                }
                FieldKind::Date => {
                    // 配置了前缀但 schema 中没有 prefix 槽位时，前缀紧贴在 date 之前
                    if let (Some(p), false) = (&prefix, prefix_placed) {
                        self.pattern.push_str(p);
                    }
                    let date = self.capture(kind, DATE_BODY);
                    self.pattern.push_str(&date);
                    date_seen = true;
                }
                FieldKind::Time => {
                    let time = self.capture(kind, TIME_BODY);
                    self.pattern.push(' ');
                    self.pattern.push_str(&time);
                }
                FieldKind::File => self.file(side, neighbour),
                FieldKind::Level | FieldKind::Reqid => {
                    self.bracket_run(&fields[i..i + run], side, separator_next_to(neighbour));
                }
            }
            i += run;
        }

        self.pattern.push_str(HEAD_TERMINATOR);
    }

    /// 相邻方括号字段 -> 有序候选组合
    fn bracket_run(&mut self, run: &[FieldKind], side: Side, outer: &str) {
        let mut combos: Vec<Vec<FieldKind>> = (1u32..1 << run.len())
            .map(|mask| {
                run.iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, kind)| *kind)
                    .collect()
            })
            .collect();
        combos.sort_by_key(|combo| {
            let closed = combo.iter().filter(|k| k.is_closed_vocabulary()).count();
            (Reverse(combo.len()), Reverse(closed))
        });

        let mut alternatives = Vec::with_capacity(combos.len());
        for combo in &combos {
            let last = combo.len() - 1;
            let mut alternative = String::new();
            for (n, kind) in combo.iter().enumerate() {
                let body = match kind {
                    FieldKind::Level => LEVEL_BODY.as_str(),
                    _ => REQID_BODY,
                };
                let field = format!(r"\[{}\]", self.capture(*kind, body));
                // 组合外侧用与相邻字段的分隔，组合内部的方括号之间可以紧贴
                let sep = match side {
                    Side::Leading if n == 0 => outer,
                    Side::Trailing if n == last => outer,
                    _ => BRACKET_SEPARATOR,
                };
                alternative.push_str(&side.join(sep, &field));
            }
            alternatives.push(alternative);
        }

        self.pattern
            .push_str(&format!("(?:{})?", alternatives.join("|")));
    }

    /// 文件位置的两种写法各用一个捕获组别名
    fn file(&mut self, side: Side, neighbour: Option<FieldKind>) {
        let quoted_sep = match neighbour {
            Some(k) if k.is_bracketed() => BRACKET_SEPARATOR,
            _ => FIELD_SEPARATOR,
        };
        let quoted = self.capture(FieldKind::File, FILE_QUOTED_BODY);
        let bare = self.capture(FieldKind::File, FILE_BARE_BODY.as_str());

        self.pattern.push_str(&format!(
            "(?:{}|{})?",
            side.join(quoted_sep, &quoted),
            side.join(FIELD_SEPARATOR, &bare)
        ));
    }

    /// 生成命名捕获组并登记组名；同一字段第二次出现时使用别名 `name_N`
    fn capture(&mut self, kind: FieldKind, body: &str) -> String {
        let seen = self.groups.iter().filter(|(k, _)| *k == kind).count();
        let name = if seen == 0 {
            kind.name().to_string()
        } else {
            format!("{}_{}", kind.name(), seen)
        };

        let fragment = format!("(?P<{}>{})", name, body);
        self.groups.push((kind, name));
        fragment
    }
}

#[inline]
fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// `["path:line"]` 写法保留引号、去掉方括号
#[inline]
fn unbracket_file(file: &str) -> &str {
    file.strip_prefix('[')
        .and_then(|f| f.strip_suffix(']'))
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_matcher() -> HeadMatcher {
        HeadMatcher::compile(&Schema::default()).unwrap()
    }

    #[test]
    fn test_head_line_cases() {
        let matcher = default_matcher();
        let cases = [
            ("2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608", true),
            ("2016/10/20 18:20:30.642666 [ERROR] github.com/qiniu/logkit/queue/disk.go:241: readOne() error", true),
            (r#"[GE2owHck-Y4IWJHS]{"error":"No such entry","code":612}"#, false),
            ("2016-10-20 17:20:30.642666 [GE2owHck-Y4IWJHS][INFO] disk.go github.com/qiniu/logkit/queue/disk.go:241: hello", false),
            ("hello", false),
            ("1234567/12/12e ax.log go", false),
            ("", false),
        ];
        for (line, expected) in cases {
            assert_eq!(matcher.is_head(line), expected, "line: {:?}", line);
        }
    }

    #[test]
    fn test_lone_level_bracket_goes_to_level() {
        let matcher = default_matcher();
        let fields = matcher
            .captures("2016/10/20 18:20:30.642666 [ERROR] github.com/qiniu/logkit/queue/disk.go:241: readOne() error")
            .unwrap();
        assert_eq!(fields.reqid, "");
        assert_eq!(fields.level, "ERROR");
        assert_eq!(fields.file, "github.com/qiniu/logkit/queue/disk.go:241:");
        assert_eq!(fields.remainder, "readOne() error");
    }

    #[test]
    fn test_numeric_reqid_slot() {
        let matcher = default_matcher();
        let fields = matcher
            .captures("2016/10/20 17:20:30.642662 [123][WARN] disk.go github.com/qiniu/logkit/queue/disk.go:241: 1")
            .unwrap();
        assert_eq!(fields.reqid, "123");
        assert_eq!(fields.level, "WARN");
        assert_eq!(fields.file, "disk.go github.com/qiniu/logkit/queue/disk.go:241:");
        assert_eq!(fields.remainder, "1");
    }

    #[test]
    fn test_chained_file_locations() {
        let matcher = default_matcher();
        let fields = matcher
            .captures("2016/10/20 17:30:21.433423 [GE2owHck-Y4IWJHS][WARN] github.com/qiniu/http/rpcutil.v1/rpc_util.go:203:  ==> qiniu.com/streaming.v2/apiserver.go:1367: E18102: The specified repo does not exist")
            .unwrap();
        assert_eq!(
            fields.file,
            "github.com/qiniu/http/rpcutil.v1/rpc_util.go:203:  ==> qiniu.com/streaming.v2/apiserver.go:1367:"
        );
        assert_eq!(fields.remainder, "E18102: The specified repo does not exist");
    }

    #[test]
    fn test_quoted_file_with_level_first() {
        let fields = Schema::parse_headers("prefix,date,time,level,reqid,file").unwrap();
        let matcher = HeadMatcher::compile(&Schema::new(fields, None).unwrap()).unwrap();

        let caps = matcher
            .captures(r#"2017/01/22 11:16:08.885550 [INFO][2pyKMgVp5EKg-ZsU]["github.com/teapots/request-logger/logger.go:75"] [REQ_END] 200"#)
            .unwrap();
        assert_eq!(caps.level, "INFO");
        assert_eq!(caps.reqid, "2pyKMgVp5EKg-ZsU");
        assert_eq!(caps.file, r#""github.com/teapots/request-logger/logger.go:75""#);
        assert_eq!(caps.remainder, "[REQ_END] 200");

        let caps = matcher
            .captures(r#"2017/01/22 11:16:08.883870 [ERROR]["qiniu.io/gaea/app/providers/admin_login/admin_login.go:29"] current uid: 74121669"#)
            .unwrap();
        assert_eq!(caps.level, "ERROR");
        assert_eq!(caps.reqid, "");
        assert_eq!(caps.remainder, "current uid: 74121669");
    }

    #[test]
    fn test_prefix_is_a_strict_gate() {
        let schema = Schema::new(Schema::parse_headers("prefix,date,time,reqid,level,file").unwrap(), Some("QINIU".to_string())).unwrap();
        let matcher = HeadMatcher::compile(&schema).unwrap();

        assert!(matcher.is_head("QINIU 2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608"));
        assert!(!matcher.is_head("2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608"));
        assert!(!matcher.is_head("QINIU 2016-10-20 17:20:30.642666 [INFO] disk.go:241: hello"));
        assert!(!matcher.is_head("QINIU  2017/03/28 15:41:06 [INFO] bdc.go:573: x"));
    }

    #[test]
    fn test_prefix_without_slot_still_required() {
        let schema = Schema::new(vec![FieldKind::Date, FieldKind::Time, FieldKind::Level], Some("a.b".to_string())).unwrap();
        let matcher = HeadMatcher::compile(&schema).unwrap();
        assert!(matcher.is_head("a.b 2017/03/28 15:41:06 [INFO] x"));
        // 前缀中的 `.` 按字面匹配
        assert!(!matcher.is_head("axb 2017/03/28 15:41:06 [INFO] x"));
    }

    #[test]
    fn test_fraction_must_be_six_digits() {
        let matcher = default_matcher();
        assert!(matcher.is_head("2017/03/28 15:41:06.123456 x"));
        assert!(!matcher.is_head("2017/03/28 15:41:06.1234 x"));
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_head() {
        let matcher = default_matcher();
        assert!(!matcher.is_head("2０１７/0３/2٨ 1５:41:06 [INFO] a.go:1: x"));
        assert!(!matcher.is_head("２０１７/03/28 15:41:06 [INFO] a.go:1: x"));

        // 非 ASCII 的请求 ID 不认领方括号，方括号留在正文中
        let fields = matcher.captures("2017/03/28 15:41:06 [请求][INFO] a.go:1: x").unwrap();
        assert_eq!(fields.reqid, "");
        assert_eq!(fields.level, "");
        assert_eq!(fields.remainder, "[请求][INFO] a.go:1: x");
    }

    #[test]
    fn test_head_fields_need_a_separator() {
        let matcher = default_matcher();
        assert!(!matcher.is_head("2017/03/28 15:41:06[INFO]a.go:1: x"));
        // 裸写的文件位置之前必须有分隔，否则整段留在正文中
        let fields = matcher.captures("2017/03/28 15:41:06 [INFO]a.go:1: x").unwrap();
        assert_eq!(fields.level, "");
        assert_eq!(fields.remainder, "[INFO]a.go:1: x");

        // 方括号之间可以紧贴
        let fields = matcher.captures("2017/03/28 15:41:06\t[abc][INFO]\ta.go:1: x").unwrap();
        assert_eq!(fields.reqid, "abc");
        assert_eq!(fields.level, "INFO");
        assert_eq!(fields.file, "a.go:1:");
    }

    #[test]
    fn test_head_does_not_span_embedded_newline() {
        let matcher = default_matcher();
        let fields = matcher.captures("2017/03/28 15:41:06\n[INFO] a.go:1: x").unwrap();
        assert_eq!(fields.time, "15:41:06");
        assert_eq!(fields.level, "");
        assert_eq!(fields.file, "");
        assert_eq!(fields.remainder, "[INFO] a.go:1: x");

        let fields = matcher
            .captures("2017/03/28 15:41:06 [INFO]\na.go:1: x")
            .unwrap();
        assert_eq!(fields.level, "INFO");
        assert_eq!(fields.file, "");
        assert_eq!(fields.remainder, "a.go:1: x");
    }

    #[test]
    fn test_date_time_only() {
        let matcher = default_matcher();
        let fields = matcher.captures("2017/3/8 15:41:06").unwrap();
        assert_eq!(fields.date, "2017/3/8");
        assert_eq!(fields.time, "15:41:06");
        assert_eq!(fields.remainder, "");
    }
}
