use std::collections::HashSet;

use crate::error::{AppError, AppResult};

/// 号码集合的领域规则, 购票与开奖共用同一套
pub const MIN_NUMBER_COUNT: usize = 6;
pub const MAX_NUMBER_COUNT: usize = 10;
pub const MIN_NUMBER_VALUE: i32 = 1;
pub const MAX_NUMBER_VALUE: i32 = 45;

/// 校验一组候选号码。规则按顺序短路, 保证错误报告稳定:
/// 1. 个数 6..=10
/// 2. 取值 1..=45
/// 3. 两两不重复
pub fn validate_number_set(numbers: &[i32]) -> AppResult<()> {
    if numbers.len() < MIN_NUMBER_COUNT || numbers.len() > MAX_NUMBER_COUNT {
        return Err(AppError::ValidationError(format!(
            "Expected between {MIN_NUMBER_COUNT} and {MAX_NUMBER_COUNT} numbers, got {}",
            numbers.len()
        )));
    }

    if let Some(bad) = numbers
        .iter()
        .find(|n| **n < MIN_NUMBER_VALUE || **n > MAX_NUMBER_VALUE)
    {
        return Err(AppError::ValidationError(format!(
            "Number {bad} is out of range ({MIN_NUMBER_VALUE}-{MAX_NUMBER_VALUE})"
        )));
    }

    let mut seen = HashSet::with_capacity(numbers.len());
    for n in numbers {
        if !seen.insert(*n) {
            return Err(AppError::ValidationError(format!(
                "Number {n} appears more than once"
            )));
        }
    }

    Ok(())
}

/// 序列化为存储用的 JSON 文本, 保持调用方给定的顺序
pub fn serialize_numbers(numbers: &[i32]) -> AppResult<String> {
    Ok(serde_json::to_string(numbers)?)
}

/// 解析存储的号码文本。
/// 入库前都经过校验, 解析失败意味着存储数据损坏, 按内部错误处理
pub fn parse_numbers(raw: &str) -> AppResult<Vec<i32>> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::InternalError(format!("Stored number list is corrupt: {e}")))
}

/// 彩票号码与开奖号码的比对结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// 所属轮次尚未开奖。与 “命中 0 个” 是两种不同状态
    Unavailable,
    Evaluated {
        /// 命中的号码, 按彩票上的原始顺序排列
        matched_numbers: Vec<i32>,
        matched_count: usize,
    },
}

/// 计算彩票号码与开奖号码的交集。
/// 两侧输入都已通过 validate_number_set, 不含重复值
pub fn evaluate_match(ticket_numbers: &[i32], drawn_numbers: Option<&[i32]>) -> MatchOutcome {
    let drawn = match drawn_numbers {
        Some(d) if !d.is_empty() => d,
        _ => return MatchOutcome::Unavailable,
    };

    let drawn_set: HashSet<i32> = drawn.iter().copied().collect();
    let matched_numbers: Vec<i32> = ticket_numbers
        .iter()
        .copied()
        .filter(|n| drawn_set.contains(n))
        .collect();
    let matched_count = matched_numbers.len();

    MatchOutcome::Evaluated {
        matched_numbers,
        matched_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::ValidationError(msg)) => msg,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_valid_sets() {
        assert!(validate_number_set(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert!(validate_number_set(&[45, 1, 23, 7, 12, 30, 9, 41, 2, 18]).is_ok());
    }

    #[test]
    fn test_rejects_wrong_count() {
        assert!(validate_number_set(&[1, 2, 3, 4, 5]).is_err());
        assert!(validate_number_set(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).is_err());
        assert!(validate_number_set(&[]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(validate_number_set(&[0, 2, 3, 4, 5, 6]).is_err());
        assert!(validate_number_set(&[1, 2, 3, 4, 5, 46]).is_err());
        assert!(validate_number_set(&[1, 2, 3, 4, 5, -7]).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let msg = validation_message(validate_number_set(&[1, 2, 3, 4, 5, 3]));
        assert!(msg.contains("more than once"));
    }

    #[test]
    fn test_count_is_checked_before_range() {
        // 同时违反个数与范围时, 应报个数错误
        let msg = validation_message(validate_number_set(&[99]));
        assert!(msg.contains("between"));
    }

    #[test]
    fn test_match_basic() {
        let outcome = evaluate_match(&[1, 2, 3, 4, 5, 6], Some(&[4, 5, 6, 7, 8, 9]));
        assert_eq!(
            outcome,
            MatchOutcome::Evaluated {
                matched_numbers: vec![4, 5, 6],
                matched_count: 3,
            }
        );
    }

    #[test]
    fn test_match_disjoint_sets() {
        let outcome = evaluate_match(&[1, 2, 3], Some(&[10, 11, 12]));
        assert_eq!(
            outcome,
            MatchOutcome::Evaluated {
                matched_numbers: vec![],
                matched_count: 0,
            }
        );
    }

    #[test]
    fn test_match_preserves_ticket_order() {
        let outcome = evaluate_match(&[44, 3, 17, 8, 29, 1], Some(&[1, 8, 44, 20, 21, 22]));
        assert_eq!(
            outcome,
            MatchOutcome::Evaluated {
                matched_numbers: vec![44, 8, 1],
                matched_count: 3,
            }
        );
    }

    #[test]
    fn test_match_unavailable_is_not_zero_matches() {
        assert_eq!(
            evaluate_match(&[1, 2, 3, 4, 5, 6], None),
            MatchOutcome::Unavailable
        );
        assert_eq!(
            evaluate_match(&[1, 2, 3, 4, 5, 6], Some(&[])),
            MatchOutcome::Unavailable
        );
    }

    #[test]
    fn test_numbers_text_roundtrip() {
        let numbers = vec![9, 1, 45, 23, 8, 17];
        let text = serialize_numbers(&numbers).unwrap();
        assert_eq!(text, "[9,1,45,23,8,17]");
        assert_eq!(parse_numbers(&text).unwrap(), numbers);
    }

    #[test]
    fn test_parse_rejects_corrupt_text() {
        assert!(parse_numbers("not json").is_err());
        assert!(parse_numbers("{\"a\":1}").is_err());
    }
}
