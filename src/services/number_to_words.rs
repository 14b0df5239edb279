/// Currency amounts written out in Brazilian-Portuguese ("por extenso")
/// for the proposal PDF price line.
///
/// Covers values up to the billions, centavos included:
///   35_000.00  → "trinta e cinco mil reais"
///   1_250.75   → "mil, duzentos e cinquenta reais e setenta e cinco centavos"
///   2_000_000  → "dois milhões de reais"

const UNITS: [&str; 20] = [
    "zero", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove",
    "dez", "onze", "doze", "treze", "quatorze", "quinze", "dezesseis", "dezessete",
    "dezoito", "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta",
    "oitenta", "noventa",
];

const HUNDREDS: [&str; 10] = [
    "", "cento", "duzentos", "trezentos", "quatrocentos", "quinhentos",
    "seiscentos", "setecentos", "oitocentos", "novecentos",
];

/// Writes a monetary amount in words. The amount is rounded to centavos.
pub fn currency_in_words(amount: f64) -> String {
    let total_centavos = (amount.abs() * 100.0).round() as u64;
    let reais = total_centavos / 100;
    let centavos = total_centavos % 100;

    let mut out = String::new();

    if reais > 0 || centavos == 0 {
        let words = integer_in_words(reais);
        // "de reais" after a bare milhão/milhões/bilhão/bilhões
        let connector = if words.ends_with("ão") || words.ends_with("ões") {
            " de "
        } else {
            " "
        };
        out.push_str(&words);
        out.push_str(connector);
        out.push_str(if reais == 1 { "real" } else { "reais" });
    }

    if centavos > 0 {
        if !out.is_empty() {
            out.push_str(" e ");
        }
        out.push_str(&integer_in_words(centavos));
        out.push_str(if centavos == 1 { " centavo" } else { " centavos" });
    }

    out
}

/// Cardinal number in words, 0 ..= 999_999_999_999.
pub fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    // (group value, words) from billions down
    let groups = [
        (n / 1_000_000_000 % 1_000, Scale::Bilhoes),
        (n / 1_000_000 % 1_000, Scale::Milhoes),
        (n / 1_000 % 1_000, Scale::Mil),
        (n % 1_000, Scale::Unidades),
    ];

    let mut segments: Vec<String> = Vec::new();
    for (value, scale) in groups {
        if value == 0 {
            continue;
        }
        segments.push(scale.apply(value));
    }

    // Portuguese joins the final segment with "e" when it reads as a unit
    // block (below 100, or a round hundred); otherwise segments are
    // comma-separated.
    let last_group = n % 1_000;
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            if i == segments.len() - 1 && (last_group < 100 || last_group % 100 == 0) {
                out.push_str(" e ");
            } else {
                out.push_str(", ");
            }
        }
        out.push_str(seg);
    }
    out
}

enum Scale {
    Unidades,
    Mil,
    Milhoes,
    Bilhoes,
}

impl Scale {
    fn apply(&self, value: u64) -> String {
        match self {
            Scale::Unidades => under_thousand(value),
            // "mil", never "um mil"
            Scale::Mil if value == 1 => "mil".to_string(),
            Scale::Mil => format!("{} mil", under_thousand(value)),
            Scale::Milhoes if value == 1 => "um milhão".to_string(),
            Scale::Milhoes => format!("{} milhões", under_thousand(value)),
            Scale::Bilhoes if value == 1 => "um bilhão".to_string(),
            Scale::Bilhoes => format!("{} bilhões", under_thousand(value)),
        }
    }
}

fn under_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    if n == 100 {
        return "cem".to_string();
    }
    let mut parts: Vec<String> = Vec::new();
    let hundreds = n / 100;
    let rest = n % 100;
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds as usize].to_string());
    }
    if rest > 0 {
        if rest < 20 {
            parts.push(UNITS[rest as usize].to_string());
        } else {
            let tens = rest / 10;
            let units = rest % 10;
            if units > 0 {
                parts.push(format!("{} e {}", TENS[tens as usize], UNITS[units as usize]));
            } else {
                parts.push(TENS[tens as usize].to_string());
            }
        }
    }
    parts.join(" e ")
}
