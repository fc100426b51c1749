use medscan::{DecodeVerbose, Field, GROUP_SEPARATOR, Matching, ReminderDraft, Result};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(payload: &str, res: &DecodeVerbose, reminder: Option<&Result<ReminderDraft>>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Decoding: \"{}\"", visible(payload)), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Input ━━━", ansi::GRAY));
    print_input(res, &palette);

    if res.details.matching == Matching::Lenient {
        println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
        print_rules(res, &palette);
    }

    println!("\n{}", palette.paint("━━━ Fields ━━━", ansi::GRAY));
    print_fields(res, &palette);

    if let Some(reminder) = reminder {
        println!("\n{}", palette.paint("━━━ Reminder ━━━", ansi::GRAY));
        print_reminder(reminder, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", res.details.total), ansi::GREEN));
    println!();
}

fn print_input(res: &DecodeVerbose, palette: &ansi::Palette) {
    let matching = match res.details.matching {
        Matching::Lenient => "lenient",
        Matching::Strict => "strict",
    };
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("matching:"),
        palette.paint(matching, ansi::BLUE),
        palette.dim("│ separators:"),
        palette.paint(res.details.separators.to_string(), ansi::YELLOW),
        palette.dim("│ signals:"),
        palette.paint(
            if res.details.signals.is_empty() { "none".to_string() } else { res.details.signals.join(", ") },
            ansi::CYAN
        ),
    );
}

fn print_rules(res: &DecodeVerbose, palette: &ansi::Palette) {
    for timing in &res.details.timings {
        let mark = if timing.matched { palette.paint("✓", ansi::GREEN) } else { palette.dim("✗") };
        println!(
            "  {} {}  {}",
            mark,
            palette.paint(&timing.rule, ansi::CYAN),
            palette.dim(format!("{:?}", timing.duration))
        );
    }
    for rule in &res.details.skipped_rules {
        println!("  {} {}  {}", palette.dim("-"), palette.dim(rule), palette.dim("skipped"));
    }
}

fn print_fields(res: &DecodeVerbose, palette: &ansi::Palette) {
    let data = &res.data;
    print_field("PC", &data.pc, palette);
    print_field("SN", &data.sn, palette);
    print_field("LOT", &data.lot, palette);

    match (&data.exp, &res.details.expiration) {
        (Field::Found(raw), Some(exp)) => println!(
            "  {:<4} {}  {}",
            palette.bold("EXP"),
            palette.bold(palette.paint(&exp.label, ansi::GREEN)),
            palette.dim(format!("raw year={} month={}", raw.year, raw.month)),
        ),
        _ => println!("  {:<4} {}", palette.bold("EXP"), palette.dim("absent")),
    }

    for hit in &res.details.hits {
        println!(
            "      {} {}  {} {}",
            palette.paint(format!("{}..{}", hit.start, hit.end), ansi::YELLOW),
            palette.paint(hit.field, ansi::BLUE),
            palette.dim("│ rule:"),
            palette.paint(&hit.rule, ansi::CYAN)
        );
    }

    if data.pc.is_absent() {
        println!("\n  {}", palette.paint("Not a recognizable medicine label (no product code).", ansi::RED));
    } else if !data.product_code_is_valid() {
        println!("\n  {}", palette.paint("Product code check digit does not match.", ansi::YELLOW));
    }
}

fn print_field(name: &str, field: &Field<String>, palette: &ansi::Palette) {
    match field {
        Field::Found(value) => {
            println!("  {:<4} {}", palette.bold(name), palette.bold(palette.paint(visible(value), ansi::GREEN)))
        }
        Field::Absent => println!("  {:<4} {}", palette.bold(name), palette.dim("absent")),
    }
}

fn print_reminder(reminder: &Result<ReminderDraft>, palette: &ansi::Palette) {
    match reminder {
        Ok(draft) => {
            println!(
                "  {} {}  {} {}",
                palette.paint(&draft.summary, ansi::BLUE),
                palette.bold(palette.paint(draft.date.to_string(), ansi::GREEN)),
                palette.dim("│ at:"),
                palette.paint(&draft.location, ansi::CYAN)
            );
            for line in draft.description.lines().filter(|l| !l.is_empty()) {
                println!("    {}", palette.dim(line));
            }
        }
        Err(err) => println!("  {}", palette.paint(format!("Cannot create a reminder: {err}"), ansi::RED)),
    }
}

/// Show Group Separators as `<GS>` so they survive the terminal.
fn visible(text: &str) -> String {
    text.replace(GROUP_SEPARATOR, "<GS>")
}
