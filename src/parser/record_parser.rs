//! 多行拼接
//!
//! 逐行处理一个批次：起始行开启新记录，继续行追加到当前记录，无法归属的行交给失败统计。
//! 状态（当前记录、输出、失败计数）只属于一次解析调用。

use crate::error::ParseError;
use crate::matcher::HeadMatcher;
use crate::parser::parse_functions::{append_continuation, parse_head};
use crate::parser::qiniulog_parser::ParseOutput;
use crate::parser::record::Record;
use crate::parser::stats::FailureAggregator;
use crate::tools::is_blank;
use tracing::{debug, trace};

/// 单次解析调用的拼接状态
pub(crate) struct RecordStitcher<'p> {
    matcher: &'p HeadMatcher,
    zone_suffix: &'p str,
    keep_degraded: bool,
    /// 正在构建的记录
    current: Option<Record>,
    records: Vec<Record>,
    stats: FailureAggregator,
}

impl<'p> RecordStitcher<'p> {
    pub(crate) fn new(
        matcher: &'p HeadMatcher,
        zone_suffix: &'p str,
        keep_degraded: bool,
        capacity: usize,
    ) -> Self {
        Self {
            matcher,
            zone_suffix,
            keep_degraded,
            current: None,
            records: Vec::with_capacity(capacity),
            stats: FailureAggregator::default(),
        }
    }

    /// 处理批次中的第 `index` 行
    pub(crate) fn feed(&mut self, index: usize, line: &str) {
        // 空行是记录边界，同时计为失败
        if is_blank(line) {
            self.close_current();
            self.fail(index, line, ParseError::EmptyLine);
            return;
        }

        if let Some(record) = parse_head(self.matcher, line, self.zone_suffix) {
            self.close_current();
            self.current = Some(record);
            self.stats.record_success();
            return;
        }

        match self.current.as_mut() {
            Some(record) => {
                append_continuation(record, line);
                self.stats.record_success();
            }
            None => self.fail(
                index,
                line,
                ParseError::NoOpenRecord {
                    line: line.to_string(),
                },
            ),
        }
    }

    /// 结束批次，输出最后一条记录和失败报告
    pub(crate) fn finish(mut self) -> ParseOutput {
        self.close_current();
        if self.stats.errors() > 0 {
            debug!(
                errors = self.stats.errors(),
                records = self.records.len(),
                "batch parsed with unparsable lines"
            );
        }
        ParseOutput {
            records: self.records,
            failure: self.stats.finish(),
        }
    }

    fn close_current(&mut self) {
        if let Some(record) = self.current.take() {
            self.records.push(record);
        }
    }

    fn fail(&mut self, index: usize, line: &str, error: ParseError) {
        trace!(index, error = %error, "unparsable log line");
        self.stats.record_failure(index, error);
        if self.keep_degraded {
            self.records.push(Record::degraded(line));
        }
    }
}
