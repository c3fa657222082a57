//! 时间编解码模块
//!
//! 提供DAISY时间字符串（SMIL时钟值）的解析、格式化和时长计算功能。

use once_cell::sync::Lazy;
use regex::Regex;

/// DAISY时间字符串的严格模式：`H+:mm:ss(.SSS)?`
///
/// 小时部分位数不限，分钟和秒必须是两位数字，毫秒部分可选且必须是三位数字。
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{2}):(\d{2})(?:\.(\d{3}))?$").unwrap());

/// 解析DAISY时间字符串为总毫秒数
///
/// 接受严格的 `H+:mm:ss(.SSS)?` 格式。任何不匹配的字符串（包括空字符串）
/// 以及任何超出范围的分量（分钟或秒 >= 60）都返回0，而不是错误。
/// 调用方无法仅凭返回值区分"时长为零"和"无法解析的字符串"。
///
/// # 参数
/// * `s` - 时间字符串，如 `"0:50:27.083"`
///
/// # 返回值
/// * `u64` - 总毫秒数，解析失败时为0
///
/// # 示例
///
/// ```rust
/// use daisyforge::daisy::time::parse_time;
///
/// assert_eq!(parse_time("0:50:27.083"), 3_027_083);
/// assert_eq!(parse_time("25:61:61"), 0);
/// assert_eq!(parse_time(""), 0);
/// ```
pub fn parse_time(s: &str) -> u64 {
    let captures = match TIME_PATTERN.captures(s) {
        Some(captures) => captures,
        None => return 0,
    };

    // 小时位数不限，超出u64范围的输入按解析失败处理
    let hours: u64 = match captures[1].parse() {
        Ok(value) => value,
        Err(_) => return 0,
    };
    let minutes: u64 = match captures[2].parse() {
        Ok(value) => value,
        Err(_) => return 0,
    };
    let seconds: u64 = match captures[3].parse() {
        Ok(value) => value,
        Err(_) => return 0,
    };
    let millis: u64 = match captures.get(4) {
        Some(m) => match m.as_str().parse() {
            Ok(value) => value,
            Err(_) => return 0,
        },
        None => 0,
    };

    // 分量超出范围视为无效输入
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return 0;
    }

    ((hours * 3600 + minutes * 60 + seconds) * 1000) + millis
}

/// 格式化毫秒数为规范的DAISY时间字符串
///
/// 输出零填充的 `HH:mm:ss.SSS` 格式，毫秒部分固定为三位数字。
/// 小时超过99时位数自然增长。
///
/// # 参数
/// * `ms` - 总毫秒数
///
/// # 返回值
/// * `String` - 格式化后的时间字符串
///
/// # 示例
///
/// ```rust
/// use daisyforge::daisy::time::format_time;
///
/// assert_eq!(format_time(3_027_083), "00:50:27.083");
/// ```
pub fn format_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// 计算两个时间字符串之间的时长（毫秒）
///
/// 结果永远不为负：如果结束时间早于开始时间，返回0。
///
/// # 参数
/// * `start` - 开始时间字符串
/// * `end` - 结束时间字符串
///
/// # 返回值
/// * `u64` - 时长（毫秒）
pub fn calculate_duration(start: &str, end: &str) -> u64 {
    parse_time(end).saturating_sub(parse_time(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_with_millis() {
        assert_eq!(parse_time("0:50:27.083"), 3_027_083);
        assert_eq!(parse_time("0:00:00.000"), 0);
        assert_eq!(parse_time("1:02:03.004"), 3_723_004);
    }

    #[test]
    fn test_parse_time_without_millis() {
        assert_eq!(parse_time("40:08:40"), 144_520_000);
        assert_eq!(parse_time("0:00:01"), 1000);
    }

    #[test]
    fn test_parse_time_invalid_input() {
        // 分量超出范围
        assert_eq!(parse_time("25:61:61"), 0);
        assert_eq!(parse_time("0:60:00"), 0);
        assert_eq!(parse_time("0:00:60"), 0);
        // 格式不匹配
        assert_eq!(parse_time(""), 0);
        assert_eq!(parse_time("abc"), 0);
        assert_eq!(parse_time("1:2:3"), 0);
        assert_eq!(parse_time("0:00:00.08"), 0);
        assert_eq!(parse_time("0:00:00.0830"), 0);
        assert_eq!(parse_time("  0:00:01"), 0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(3_027_083), "00:50:27.083");
        assert_eq!(format_time(0), "00:00:00.000");
        assert_eq!(format_time(144_520_000), "40:08:40.000");
        // 超过两位数的小时
        assert_eq!(format_time(360_000_000), "100:00:00.000");
    }

    #[test]
    fn test_round_trip() {
        // 规范格式的字符串经过parse_time和format_time后应保持不变
        for s in ["00:00:00.000", "00:50:27.083", "12:34:56.789", "99:59:59.999"] {
            assert_eq!(format_time(parse_time(s)), s);
        }
    }

    #[test]
    fn test_calculate_duration() {
        assert_eq!(calculate_duration("0:00:10.500", "0:00:15.750"), 5250);
        // 结束早于开始时返回0
        assert_eq!(calculate_duration("0:00:15.750", "0:00:10.500"), 0);
        // 无法解析的输入按0处理
        assert_eq!(calculate_duration("invalid", "0:00:01"), 1000);
        assert_eq!(calculate_duration("0:00:01", "invalid"), 0);
    }
}
