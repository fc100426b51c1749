use crate::{Expiry, Field, Matching, MedicineData, Options, decode, decode_with};

const GS: &str = "\u{1d}";

fn text(value: &str) -> Field<String> {
    Field::Found(value.to_string())
}

fn exp(year: &str, month: &str) -> Field<Expiry> {
    Field::Found(Expiry { month: month.to_string(), year: year.to_string() })
}

#[test]
fn worked_example() {
    let input = format!("{GS}01000123456789053010A1B2C3{GS}172608");
    let data = decode(&input);
    assert_eq!(
        data,
        MedicineData { pc: text("00012345678905"), sn: Field::Absent, lot: text("A1B2C3"), exp: exp("26", "08") }
    );
}

#[test]
fn end_to_end_example() {
    let input = format!("{GS}01012345678901234{GS}1726059910ABC123{GS}173010LOT001");
    let data = decode(&input);
    assert_eq!(data.pc, text("01234567890123"));
    assert_eq!(data.sn, Field::Absent);
    assert_eq!(data.lot, text("LOT001"));
    assert_eq!(data.exp, exp("26", "05"));
}

#[test]
fn product_code_examples() {
    // (expected, input)
    let cases: Vec<(Field<String>, String)> = vec![
        (text("00012345678905"), format!("{GS}0100012345678905")),
        (text("09506000134352"), format!("]d2{GS}0109506000134352{GS}17260831")),
        (text("éééééééééééééé"), format!("{GS}01{}", "é".repeat(14))),
        (text(&format!("0950600013{GS}352")), format!("{GS}010950600013{GS}352")),
        (text("11111111111111"), format!("{GS}0111111111111111{GS}0122222222222222")),
        (Field::Absent, "0100012345678905".to_string()),
        (Field::Absent, format!("{GS}010001234567890")),
        (Field::Absent, format!("{GS}0200012345678905")),
        (Field::Absent, format!("{GS}01000123\n45678905")),
        (Field::Absent, format!("{GS}010001234567890\r5")),
        (Field::Absent, format!("{GS}01000123\u{2028}45678905")),
        (text("00012345678905"), format!("{GS}0100012345678905\r\n")),
        (Field::Absent, String::new()),
    ];

    for (expected, input) in cases {
        assert_eq!(decode(&input).pc, expected, "input {input:?}");
    }
}

#[test]
fn serial_number_examples() {
    let cases: Vec<(Field<String>, String)> = vec![
        (text("ABCDEFGHIJKLMN"), "21ABCDEFGHIJKLMN".to_string()),
        (text("ABCDEFGHIJKLMN"), format!("{GS}21ABCDEFGHIJKLMN")),
        (text("ABCDEFGHIJKLMN"), "xx21ABCDEFGHIJKLMNOP".to_string()),
        (text(&format!("ABC{GS}DEFGHIJKLM")), format!("21ABC{GS}DEFGHIJKLM")),
        (text("FIRSTSERIAL001"), "21FIRSTSERIAL001 21SECONDSERIAL1".to_string()),
        (Field::Absent, "21ABC".to_string()),
        (Field::Absent, "21ABCDEF\nGHIJKLMNOP".to_string()),
        (Field::Absent, "21ABCDEFGHIJKLM\r".to_string()),
        (Field::Absent, "21ABC\u{2028}DEFGHIJKLMNOP".to_string()),
        (Field::Absent, "2ABCDEFGHIJKLMNOP".to_string()),
    ];

    for (expected, input) in cases {
        assert_eq!(decode(&input).sn, expected, "input {input:?}");
    }
}

#[test]
fn lot_examples() {
    let cases: Vec<(Field<String>, String)> = vec![
        (text("A1B2C3"), "3010A1B2C3".to_string()),
        (text("A1B2C3"), format!("{GS}3010A1B2C3XYZ")),
        (text(&format!("LOT{GS}01")), format!("3010LOT{GS}01")),
        (text("AAAAAA"), "3010AAAAAA3010BBBBBB".to_string()),
        (Field::Absent, "3010ABCDE".to_string()),
        (Field::Absent, "10A1B2C3".to_string()),
        (Field::Absent, "30 10A1B2C3".to_string()),
        (Field::Absent, "3010A1B2C\r".to_string()),
        (Field::Absent, "3010A1\u{2029}B2C3".to_string()),
        (text("A1B2C3"), "3010A1B2C3\r".to_string()),
    ];

    for (expected, input) in cases {
        assert_eq!(decode(&input).lot, expected, "input {input:?}");
    }
}

#[test]
fn expiration_examples() {
    let cases: Vec<(Field<Expiry>, String)> = vec![
        (exp("26", "08"), format!("{GS}17260831")),
        (exp("05", "01"), format!("{GS}170501")),
        (exp("99", "12"), format!("{GS}179912{GS}17260831")),
        (exp("26", "13"), format!("{GS}172613")),
        (exp("27", "02"), format!("{GS}17AB{GS}172702")),
        (Field::Absent, "17260831".to_string()),
        (Field::Absent, format!("{GS}17260")),
        (Field::Absent, format!("{GS}1726AB")),
        (Field::Absent, format!("{GS}17٢٦٠٨")),
        (Field::Absent, format!("{GS}1526083110LOT")),
    ];

    for (expected, input) in cases {
        assert_eq!(decode(&input).exp, expected, "input {input:?}");
    }
}

#[test]
fn fields_are_extracted_independently() {
    let corrupted_exp = decode(&format!("{GS}0100012345678905{GS}17AB08"));
    assert_eq!(corrupted_exp.pc, text("00012345678905"));
    assert_eq!(corrupted_exp.exp, Field::Absent);

    let corrupted_pc = decode(&format!("{GS}01000123{GS}172608"));
    assert_eq!(corrupted_pc.pc, Field::Absent);
    assert_eq!(corrupted_pc.exp, exp("26", "08"));
}

#[test]
fn lenient_serial_can_fire_inside_another_field() {
    let input = format!("{GS}0121000000000000{GS}17260831");
    let data = decode(&input);
    assert_eq!(data.pc, text("21000000000000"));
    assert_eq!(data.sn, text(&format!("000000000000{GS}1")));

    let strict = decode_with(&input, &Options { matching: Matching::Strict });
    assert_eq!(strict.pc, text("21000000000000"));
    assert_eq!(strict.sn, Field::Absent);
    assert_eq!(strict.exp, exp("26", "08"));
}

#[test]
fn strict_reads_variable_length_fields() {
    let input = format!("]d2{GS}010001234567890517270531{GS}21SN42{GS}10B7");
    let lenient = decode(&input);
    let strict = decode_with(&input, &Options { matching: Matching::Strict });

    assert_eq!(lenient.pc, text("00012345678905"));
    assert_eq!(lenient.sn, Field::Absent);
    assert_eq!(lenient.lot, Field::Absent);
    assert_eq!(lenient.exp, Field::Absent);
    assert_eq!(
        strict,
        MedicineData { pc: text("00012345678905"), sn: text("SN42"), lot: text("B7"), exp: exp("27", "05") }
    );
}

#[test]
fn decoding_is_deterministic() {
    let input = format!("{GS}0100012345678905{GS}172608{GS}21ABCDEFGHIJKLMN");
    assert_eq!(decode(&input), decode(&input));
}
