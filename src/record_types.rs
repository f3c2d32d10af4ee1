//! 行首字段定义模块
//!
//! 定义了行首可能出现的字段种类 [`FieldKind`]，以及由字段顺序和可选字面前缀组成的
//! [`Schema`]。Schema 在构造时完成校验，之后不可变。

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// 行首字段种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 字面前缀（如部署标签），出现在 date 之前
    Prefix,
    /// 日期，`YYYY/M/D`
    Date,
    /// 时间，`HH:MM:SS[.ffffff]`
    Time,
    /// 方括号包围的日志级别
    Level,
    /// 方括号包围的请求 ID
    Reqid,
    /// 源文件位置
    File,
}

impl FieldKind {
    /// 全部字段种类（按默认顺序）
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Prefix,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::Reqid,
        FieldKind::Level,
        FieldKind::File,
    ];

    /// 字段名，同时也是正则中命名捕获组的名字
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Prefix => "prefix",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Level => "level",
            FieldKind::Reqid => "reqid",
            FieldKind::File => "file",
        }
    }

    /// 是否必需字段
    pub fn is_required(&self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::Time)
    }

    /// 是否以 `[...]` 形式出现
    ///
    /// schema 中相邻的方括号字段会被编译成一组有序的候选组合，见 [`crate::matcher`]。
    pub fn is_bracketed(&self) -> bool {
        matches!(self, FieldKind::Level | FieldKind::Reqid)
    }

    /// 取值是否来自封闭集合
    ///
    /// 只有一个方括号、而 schema 声明了多个方括号字段时，封闭集合字段优先认领它。
    pub fn is_closed_vocabulary(&self) -> bool {
        matches!(self, FieldKind::Level)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        FieldKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| ConfigError::UnknownField(s.trim().to_string()))
    }
}

/// 行首字段顺序
///
/// 不变量：
/// - date、time 必须存在，且 time 紧跟在 date 之后
/// - 每个字段至多出现一次
/// - prefix（若声明）必须位于 date 之前
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldKind>,
    prefix: Option<String>,
}

impl Schema {
    /// 由字段顺序和可选字面前缀创建 Schema
    ///
    /// 空字符串前缀等同于未配置前缀。
    pub fn new(fields: Vec<FieldKind>, prefix: Option<String>) -> Result<Self, ConfigError> {
        for (i, kind) in fields.iter().enumerate() {
            if fields[..i].contains(kind) {
                return Err(ConfigError::DuplicateField(*kind));
            }
        }

        let position = |kind: FieldKind| fields.iter().position(|k| *k == kind);

        let date = position(FieldKind::Date).ok_or(ConfigError::MissingField(FieldKind::Date))?;
        let time = position(FieldKind::Time).ok_or(ConfigError::MissingField(FieldKind::Time))?;
        if time != date + 1 {
            return Err(ConfigError::DateTimeNotAdjacent);
        }
        if let Some(prefix_pos) = position(FieldKind::Prefix) {
            if prefix_pos > date {
                return Err(ConfigError::PrefixNotLeading);
            }
        }

        Ok(Self {
            fields,
            prefix: prefix.filter(|p| !p.is_empty()),
        })
    }

    /// 解析逗号分隔的字段列表，如 `"prefix,date,time,level,reqid,file"`
    ///
    /// 字段名大小写不敏感，空项会被忽略。
    pub fn parse_headers(headers: &str) -> Result<Vec<FieldKind>, ConfigError> {
        headers
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .collect()
    }

    /// 字段顺序
    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }

    /// 字面前缀
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// 是否声明了某个字段
    pub fn contains(&self, kind: FieldKind) -> bool {
        self.fields.contains(&kind)
    }
}

impl Default for Schema {
    /// 标准布局：`prefix,date,time,reqid,level,file`，无字面前缀
    fn default() -> Self {
        Self {
            fields: FieldKind::ALL.to_vec(),
            prefix: None,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(FieldKind::name).collect();
        f.write_str(&names.join(","))
    }
}
