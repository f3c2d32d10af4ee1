//! 部分失败统计
//!
//! 一次批量解析中无法进入任何记录的行会被计数，并保留最后一次失败的原因。
//! 失败统计只是附带信息，不会阻止已解析记录的输出。

use crate::error::ParseError;
use std::fmt;

/// 部分失败报告
///
/// 只有失败行数大于 0 时才会出现在解析结果中。实现了 [`std::error::Error`]，
/// 调用方如需把“有行失败”当成管线级错误，可以直接用 `?` 向上传播。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFailure {
    /// 失败行数
    pub errors: u64,

    /// 进入结构化记录的行数（起始行与继续行）
    pub successes: u64,

    /// 失败行在批次中的下标
    pub error_indices: Vec<usize>,

    /// 最后一次失败的原因
    pub last_error: ParseError,
}

impl fmt::Display for PartialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line(s) failed to parse ({} succeeded), last error: {}",
            self.errors, self.successes, self.last_error
        )
    }
}

impl std::error::Error for PartialFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// 单次解析调用内的失败计数器
///
/// 每次 `parse` 新建一个，从不跨调用复用。
#[derive(Debug, Default)]
pub(crate) struct FailureAggregator {
    successes: u64,
    error_indices: Vec<usize>,
    last_error: Option<ParseError>,
}

impl FailureAggregator {
    pub(crate) fn record_success(&mut self) {
        self.successes += 1;
    }

    pub(crate) fn record_failure(&mut self, index: usize, error: ParseError) {
        self.error_indices.push(index);
        self.last_error = Some(error);
    }

    pub(crate) fn errors(&self) -> u64 {
        self.error_indices.len() as u64
    }

    /// 没有失败时返回 `None`
    pub(crate) fn finish(self) -> Option<PartialFailure> {
        let last_error = self.last_error?;
        Some(PartialFailure {
            errors: self.error_indices.len() as u64,
            successes: self.successes,
            error_indices: self.error_indices,
            last_error,
        })
    }
}
