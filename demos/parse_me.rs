use argplan::{Function, Parameter};

fn main() {
    let parse_me = Function::new("parse_me", |arguments| {
        let one: String = arguments.get("one");
        let two: i64 = arguments.get("two");
        let three: i64 = arguments.get("three");
        (one.repeat(two as usize), three * three)
    })
    .parameter(Parameter::new("one").typed::<String>())
    .parameter(Parameter::new("two").typed::<i64>())
    .parameter(Parameter::new("three").typed::<i64>().default(12i64))
    .docstring(
        r#"Could use some parsing.

        Args:
            one: some stuff shouldn't be written down
            two: I can turn 2 syllables words into 6 syllables words
            three: I don't like the number three
        "#,
    );

    let (text, square) = parse_me.parse();
    println!("{text} {square}");
}
