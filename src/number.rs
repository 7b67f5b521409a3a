//! 表格数字转十进制文本
//!
//! 数字以 `f64` 读入，先按 JVM 打印 double 的方式输出（`[1e-3, 1e7)` 内为普通形式，
//! 之外为 `1.23E10` 形式），再由 [`plain_decimal`] 把科学计数法改写成定点小数。
//! 定点小数的位数取决于科学计数法的数字排布，两步的结果必须完全一致。

use chrono::{Days, NaiveDate};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// 有限非零 `|d|` 的最短可还原数字串
///
/// 返回不带前导零的数字和首位数字的十进制指数，例如 `1234.5` 得到 `("12345", 3)`。
fn shortest_digits(d: f64) -> (String, i32) {
    let sci = format!("{:e}", d.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exp.parse().unwrap_or(0))
}

/// double 的默认文本: `12.0`、`0.001`、`1.23E10`、`1.0E-5`
///
/// 数字部分取最短可还原位数。JVM 对次正规数至少保留两位有效数字，
/// 所以极小值会不同：最小的次正规数在 JVM 中是 `4.9E-324`，这里是 `5.0E-324`。
pub fn java_display(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let sign = if d.is_sign_negative() { "-" } else { "" };
    if d == 0.0 {
        return format!("{}0.0", sign);
    }

    let (digits, exp) = shortest_digits(d);
    if (-3..7).contains(&exp) {
        let plain = format!("{}", d.abs());
        if plain.contains('.') {
            format!("{}{}", sign, plain)
        } else {
            format!("{}{}.0", sign, plain)
        }
    } else {
        let fraction = if digits.len() > 1 { &digits[1..] } else { "0" };
        format!("{}{}.{}E{}", sign, &digits[..1], fraction, exp)
    }
}

/// 十进制数字串表示的非负整数的补码字节长度，至少为 1
fn two_complement_len(digits: &str) -> i32 {
    let n: u128 = digits.parse().unwrap_or(0);
    let bits = 128 - n.leading_zeros() as i32;
    bits / 8 + 1
}

/// 按 `scale` 位小数输出，对最短十进制数字四舍五入
fn fixed_point(d: f64, scale: usize) -> String {
    let sign = if d.is_sign_negative() { "-" } else { "" };
    if d == 0.0 {
        return format!("{}{:.*}", sign, scale, 0.0);
    }

    let (digits, exp) = shortest_digits(d);
    let mut digits: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    // 小数点左边的位数，可能为 0 或负数
    let mut int_len = exp as i64 + 1;
    let keep = int_len + scale as i64;

    if keep < 0 {
        digits.clear();
    } else if (keep as usize) < digits.len() {
        let keep = keep as usize;
        let round_up = digits[keep] >= 5;
        digits.truncate(keep);
        if round_up {
            let mut i = keep;
            loop {
                if i == 0 {
                    digits.insert(0, 1);
                    int_len += 1;
                    break;
                }
                i -= 1;
                if digits[i] == 9 {
                    digits[i] = 0;
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }
    }

    let digit_at = |pos: i64| -> char {
        if pos < 0 || pos as usize >= digits.len() {
            '0'
        } else {
            (b'0' + digits[pos as usize]) as char
        }
    };

    let mut out = String::from(sign);
    if int_len <= 0 {
        out.push('0');
    } else {
        out.extend((0..int_len).map(digit_at));
    }
    if scale > 0 {
        out.push('.');
        out.extend((int_len..int_len + scale as i64).map(digit_at));
    }
    out
}

/// 把 `d` 的默认文本转换成不带指数的十进制字符串
///
/// 科学计数法按 `max(len - exp, 0)` 位小数重新输出，`len` 是尾数小数部分当作整数时的补码字节长度。
/// 普通形式只去掉末尾的 `.0`。
pub fn plain_decimal(d: f64) -> String {
    let value = java_display(d);
    match value.find('E') {
        Some(idx_e) => {
            let idx_point = value.find('.').unwrap_or(idx_e);
            let fraction = value.get(idx_point + 1..idx_e).unwrap_or("");
            let pow: i32 = value[idx_e + 1..].parse().unwrap_or(0);
            let len = two_complement_len(fraction);
            let scale = (len - pow).max(0) as usize;
            fixed_point(d, scale)
        }
        None => match value.strip_suffix(".0") {
            Some(stripped) => stripped.to_string(),
            None => value,
        },
    }
}

/// 1900 日期系统的序列号转为 `YYYY-MM-DD`
///
/// 序列号 61 之前没有 1900-02-29 的偏移，小数部分按毫秒四舍五入。
pub fn serial_to_date(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let whole_days = serial.floor();
    let millis = ((serial - whole_days) * MILLIS_PER_DAY).round();
    let mut days = whole_days as u64;
    if millis >= MILLIS_PER_DAY {
        days += 1;
    }
    let base = if whole_days < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let date = base.checked_add_days(Days::new(days))?;
    Some(date.format("%Y-%m-%d").to_string())
}
