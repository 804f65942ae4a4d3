/// Format a SEK amount with space-grouped thousands (e.g. 25000 -> "25 000 kr").
pub fn format_sek(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{grouped} kr")
}

/// Format a progress percentage, rounded to a whole number.
pub fn format_progress(percent: f64) -> String {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    format!("{}%", percent.round() as u8)
}

/// Compact XP label (e.g. 950 -> "950 XP", 12500 -> "12.5K XP", 3000000 -> "3M XP").
pub fn format_xp(xp: u64) -> String {
    let (scaled, suffix) = match xp {
        0..=9_999 => return format!("{xp} XP"),
        10_000..=999_999 => (xp as f64 / 1_000.0, "K"),
        _ => (xp as f64 / 1_000_000.0, "M"),
    };

    let rounded = (scaled * 10.0).floor() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}{suffix} XP", rounded as u64)
    } else {
        format!("{rounded:.1}{suffix} XP")
    }
}

/// Coarse membership age between two unix timestamps (e.g. "today", "3d", "2mo", "1y").
pub fn format_membership_age(joined_at: u64, now: u64) -> String {
    let days = now.saturating_sub(joined_at) / 86_400;

    match days {
        0 => "today".to_owned(),
        1..=29 => format!("{days}d"),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
