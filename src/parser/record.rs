//! Record 结构定义和相关方法
//!
//! Record 表示一条解析完成的日志记录：起始行提供结构化字段，继续行追加到 `log` 中。

/// 字段名（按输出顺序）
pub const FIELD_NAMES: [&str; 5] = ["time", "reqid", "level", "file", "log"];

/// 一条日志记录
///
/// 结构化字段缺席时为空串。由无法解析的行产生的降级记录只有 `log` 有值，
/// 可通过 [`Record::is_degraded`] 判断。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// 规范化后的时间：`date time` + 时区后缀
    pub time: String,

    /// 请求 ID
    pub reqid: String,

    /// 日志级别
    pub level: String,

    /// 源文件位置
    pub file: String,

    /// 消息正文（物理行去掉制表符、裁掉首尾空白后以单个空格拼接）
    pub log: String,
}

impl Record {
    /// 由无法解析的原始行创建降级记录
    pub fn degraded(raw: impl Into<String>) -> Self {
        Self {
            log: raw.into(),
            ..Default::default()
        }
    }

    /// 是否为降级记录
    pub fn is_degraded(&self) -> bool {
        self.time.is_empty()
    }

    /// 按字段名取值
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "time" => Some(&self.time),
            "reqid" => Some(&self.reqid),
            "level" => Some(&self.level),
            "file" => Some(&self.file),
            "log" => Some(&self.log),
            _ => None,
        }
    }

    /// 按固定顺序遍历 `(字段名, 取值)`
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FIELD_NAMES
            .into_iter()
            .map(move |name| (name, self.get(name).unwrap_or_default()))
    }
}
