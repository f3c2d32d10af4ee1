//! Parser 配置模块
//!
//! 解析器只需要一张扁平的 key → string 配置表即可构造，行首格式变化时只需修改字段顺序
//! 配置，不需要修改解析逻辑。

use crate::error::ConfigError;
use crate::parser::constants::{
    KEY_DISABLE_RECORD_ERRDATA, KEY_LOG_HEADERS, KEY_PARSER_NAME, KEY_PARSER_TYPE, KEY_PREFIX,
    PARSER_TYPE,
};
use crate::record_types::{FieldKind, Schema};
use crate::tools::local_zone_suffix;
use std::collections::HashMap;

/// Parser 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// 解析器名称，由 `name()` 返回
    pub name: String,

    /// 行首字段顺序
    pub headers: Vec<FieldKind>,

    /// 字面前缀（可选）
    pub prefix: Option<String>,

    /// 为 `true` 时无法解析的行只计数、不生成降级记录
    pub disable_record_errdata: bool,

    /// 时区后缀；为 `None` 时使用本机时区
    pub zone_suffix: Option<String>,
}

impl ParserConfig {
    /// 从扁平配置表构造
    ///
    /// 识别的键：
    /// - `name`：解析器名称，默认 `qiniulog`
    /// - `type`：若存在必须为 `qiniulog`
    /// - `qiniulog_log_headers`：逗号分隔的字段顺序
    /// - `qiniulog_prefix`：字面前缀
    /// - `disable_record_errdata`：`true` / `false`
    ///
    /// 其余键会被忽略，由外部注册表自行处理。
    pub fn from_map(conf: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(parser_type) = conf.get(KEY_PARSER_TYPE) {
            if parser_type.trim() != PARSER_TYPE {
                return Err(ConfigError::UnsupportedParserType(parser_type.clone()));
            }
        }

        if let Some(name) = conf.get(KEY_PARSER_NAME).filter(|n| !n.trim().is_empty()) {
            config.name = name.trim().to_string();
        }

        if let Some(headers) = conf.get(KEY_LOG_HEADERS).filter(|h| !h.trim().is_empty()) {
            config.headers = Schema::parse_headers(headers)?;
        }

        if let Some(prefix) = conf.get(KEY_PREFIX) {
            config.prefix = Some(prefix.trim().to_string()).filter(|p| !p.is_empty());
        }

        if let Some(value) = conf.get(KEY_DISABLE_RECORD_ERRDATA) {
            config.disable_record_errdata = parse_bool(KEY_DISABLE_RECORD_ERRDATA, value)?;
        }

        Ok(config)
    }

    /// 设置字段顺序
    pub fn with_headers(mut self, headers: Vec<FieldKind>) -> Self {
        self.headers = headers;
        self
    }

    /// 设置字面前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// 设置是否丢弃无法解析的行
    pub fn with_disable_record_errdata(mut self, disable: bool) -> Self {
        self.disable_record_errdata = disable;
        self
    }

    /// 固定时区后缀（如 `" +08:00"`），用于回放其他主机的日志或编写确定性测试
    pub fn with_zone_suffix(mut self, zone_suffix: impl Into<String>) -> Self {
        self.zone_suffix = Some(zone_suffix.into());
        self
    }

    /// 校验并生成 Schema
    pub fn schema(&self) -> Result<Schema, ConfigError> {
        Schema::new(self.headers.clone(), self.prefix.clone())
    }

    /// 实际使用的时区后缀
    pub fn resolved_zone_suffix(&self) -> String {
        self.zone_suffix
            .clone()
            .unwrap_or_else(|| local_zone_suffix().to_string())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: PARSER_TYPE.to_string(),
            headers: Schema::default().fields().to_vec(),
            prefix: None,
            disable_record_errdata: false,
            zone_suffix: None,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
