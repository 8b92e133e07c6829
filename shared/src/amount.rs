//! 数值文本处理模块
//!
//! 表格中所有数值字段都以文本形式保存（与输入框一一对应），
//! 只有在计算合计或提交时才转换为数字：
//! - 空字符串或无法解析的内容按 0 处理
//! - 数量转换为 `i64`，金额转换为 `f64`

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 将数量文本转换为整数
///
/// 带小数的输入会被截断（"4.9" -> 4）。
pub fn parse_quantity(text: &str) -> i64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        })
        .unwrap_or(0)
}

/// 将金额文本转换为浮点数
pub fn parse_amount(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 格式化金额，整数值不带小数部分（60000 而不是 60000.0）
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 以印尼格式显示金额：千位用 `.` 分隔
pub fn format_rupiah(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

// =========================================================
// 宽松的反序列化辅助函数
// =========================================================
//
// 后端的 decimal 字段经常以字符串形式返回（"15000.00"），
// 这里同时接受数字和字符串。

/// 将数字 / 字符串 / null 统一转换为文本
pub fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// 可选金额：缺失、null 或无法解析时为 `None`
pub fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// 宽松整数：数字或数字字符串，其余情况为 0
pub fn de_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("10"), 10);
        assert_eq!(parse_quantity(" 7 "), 7);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("4.9"), 4);
        assert_eq!(parse_quantity("-3"), -3);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("15000.50"), 15000.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("x1"), 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(60000.0), "60000");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(1500000.0), "Rp 1.500.000");
        assert_eq!(format_rupiah(999.0), "Rp 999");
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(-2500.0), "Rp -2.500");
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "de_text")]
        text: String,
        #[serde(default, deserialize_with = "de_opt_amount")]
        price: Option<f64>,
        #[serde(deserialize_with = "de_lenient_u32")]
        week: u32,
    }

    #[test]
    fn test_lenient_deserializers() {
        let p: Probe =
            serde_json::from_str(r#"{"text": 12, "price": "15000.00", "week": "3"}"#).unwrap();
        assert_eq!(p.text, "12");
        assert_eq!(p.price, Some(15000.0));
        assert_eq!(p.week, 3);

        let p: Probe = serde_json::from_str(r#"{"text": null, "price": null, "week": -1}"#).unwrap();
        assert_eq!(p.text, "");
        assert_eq!(p.price, None);
        assert_eq!(p.week, 0);

        let p: Probe = serde_json::from_str(r#"{"text": "8", "week": 2}"#).unwrap();
        assert_eq!(p.price, None);
    }
}
