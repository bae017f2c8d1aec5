//! Numbers spelled out in English words.

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

// Short scale; u64 tops out in the quintillions.
const SCALES: [&str; 7] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
];

/// Convert an integer to English words.
///
/// Uses short-scale names and hyphenated compound tens, e.g.
/// `5432` becomes `"Five Thousand Four Hundred Thirty-Two"`. Zero is
/// `"Zero"` and negative numbers are prefixed with `"Negative "`.
pub fn number_to_words(n: i64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let words = magnitude_to_words(n.unsigned_abs());
    if n < 0 {
        format!("Negative {}", words)
    } else {
        words
    }
}

fn magnitude_to_words(mut n: u64) -> String {
    let mut groups = Vec::new();
    let mut scale = 0;

    while n > 0 {
        let chunk = (n % 1000) as usize;
        if chunk > 0 {
            let mut words = chunk_to_words(chunk);
            if !SCALES[scale].is_empty() {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        n /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Words for 1..=999.
fn chunk_to_words(chunk: usize) -> String {
    let mut parts = Vec::new();
    let hundreds = chunk / 100;
    let rest = chunk % 100;

    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds]));
    }

    if rest > 0 {
        if rest < 20 {
            parts.push(ONES[rest].to_string());
        } else {
            let tens = TENS[rest / 10];
            match rest % 10 {
                0 => parts.push(tens.to_string()),
                ones => parts.push(format!("{}-{}", tens, ONES[ones])),
            }
        }
    }

    parts.join(" ")
}

/// Spell out a dollar amount for the consideration clause.
///
/// Cents are `round(fraction * 100)`; zero cents reads as `"no cents"`.
/// Non-finite amounts produce an empty string.
pub fn format_price_words(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    let magnitude = amount.abs();
    let mut dollars = magnitude.floor();
    let mut cents = ((magnitude - dollars) * 100.0).round() as i64;
    if cents >= 100 {
        dollars += 1.0;
        cents -= 100;
    }

    let dollar_words = number_to_words(dollars as i64);
    let cents_words = if cents == 0 {
        "no".to_string()
    } else {
        number_to_words(cents)
    };
    let sign = if amount < 0.0 && (dollars > 0.0 || cents > 0) {
        "Negative "
    } else {
        ""
    };

    format!("{}{} Dollars and {} cents", sign, dollar_words, cents_words)
}
