//! QiniulogParser - 按字段顺序解析七牛风格的应用日志
//!
//! 构造时编译一次行首匹配器，之后每次 `parse` 都只读共享它，并为该次调用新建拼接状态，
//! 因此同一个解析器实例可以被反复调用，也可以被多个线程同时调用（各自处理不同批次）。

use crate::error::ConfigError;
use crate::matcher::HeadMatcher;
use crate::parser::record::Record;
use crate::parser::record_parser::RecordStitcher;
use crate::parser::stats::PartialFailure;
use crate::parser_config::ParserConfig;
use crate::record_types::Schema;
use std::collections::HashMap;
use tracing::debug;

/// 可注册到解析器注册表的日志解析器
pub trait LogParser: Send + Sync {
    /// 解析器名称
    fn name(&self) -> &str;

    /// 解析一个批次
    fn parse(&self, lines: &[&str]) -> ParseOutput;
}

/// 一次批量解析的结果
///
/// `failure` 为 `Some` 表示有部分行解析失败，但 `records` 中已解析的记录依然有效。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOutput {
    /// 按起始行顺序输出的记录（含降级记录）
    pub records: Vec<Record>,

    /// 部分失败报告
    pub failure: Option<PartialFailure>,
}

impl ParseOutput {
    /// 失败行数
    pub fn error_count(&self) -> u64 {
        self.failure.as_ref().map_or(0, |f| f.errors)
    }

    /// 是否所有行都成功解析
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// 拆分为记录与失败报告
    pub fn into_parts(self) -> (Vec<Record>, Option<PartialFailure>) {
        (self.records, self.failure)
    }
}

/// 七牛风格日志解析器
///
/// # 示例
///
/// ```
/// use qiniulog_parser::{ParserConfig, QiniulogParser};
///
/// let parser = QiniulogParser::new(ParserConfig::default().with_zone_suffix(" +08:00")).unwrap();
/// let output = parser.parse(&[
///     "2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608",
///     "    caused by: disk full",
/// ]);
///
/// assert!(output.is_complete());
/// assert_eq!(output.records.len(), 1);
/// assert_eq!(output.records[0].time, "2017/03/28 15:41:06 +08:00");
/// assert_eq!(output.records[0].log, "deleted: 67608 caused by: disk full");
/// ```
#[derive(Debug, Clone)]
pub struct QiniulogParser {
    name: String,
    schema: Schema,
    matcher: HeadMatcher,
    zone_suffix: String,
    disable_record_errdata: bool,
}

impl QiniulogParser {
    /// 按配置构造解析器
    ///
    /// schema 非法（缺少 date/time、顺序不一致等）时直接失败。
    pub fn new(config: ParserConfig) -> Result<Self, ConfigError> {
        let schema = config.schema()?;
        let matcher = HeadMatcher::compile(&schema)?;
        let zone_suffix = config.resolved_zone_suffix();

        debug!(
            name = %config.name,
            schema = %schema,
            pattern = matcher.as_str(),
            "qiniulog parser constructed"
        );

        Ok(Self {
            name: config.name,
            schema,
            matcher,
            zone_suffix,
            disable_record_errdata: config.disable_record_errdata,
        })
    }

    /// 从扁平配置表构造解析器
    pub fn from_map(conf: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::new(ParserConfig::from_map(conf)?)
    }

    /// 解析一个批次
    ///
    /// 从不因为单行失败而中断；失败只体现在返回值的 `failure` 中。
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> ParseOutput {
        let mut stitcher = RecordStitcher::new(
            &self.matcher,
            &self.zone_suffix,
            !self.disable_record_errdata,
            lines.len(),
        );
        for (index, line) in lines.iter().enumerate() {
            stitcher.feed(index, line.as_ref());
        }
        stitcher.finish()
    }

    /// 判断一行是否为记录起始行
    pub fn is_head(&self, line: &str) -> bool {
        self.matcher.is_head(line)
    }

    /// 解析器名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 编译所用的 schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// 编译后的行首正则源码
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// 追加到时间后的时区后缀
    pub fn zone_suffix(&self) -> &str {
        &self.zone_suffix
    }
}

impl LogParser for QiniulogParser {
    fn name(&self) -> &str {
        QiniulogParser::name(self)
    }

    fn parse(&self, lines: &[&str]) -> ParseOutput {
        QiniulogParser::parse(self, lines)
    }
}
