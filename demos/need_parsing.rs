use argplan::{Class, Initializer, Method, Parameter};

struct NeedParsing {
    four: i64,
}

fn main() {
    let parser = Class::new("NeedParsing")
        .program("need_parsing")
        .docstring("A class that needs some parsing.")
        .initializer(
            Initializer::new("__init__", |arguments| NeedParsing {
                four: arguments.get("four"),
            })
            .parameter(Parameter::new("self"))
            .parameter(Parameter::new("four").typed::<i64>())
            .docstring(
                r#"
        Args:
            four: an int that will be used to multiply stuff
        "#,
            ),
        )
        .method(
            Method::new("multiply_self_arg", |instance: &mut NeedParsing, arguments| {
                (instance.four * arguments.get::<i64>("num")).to_string()
            })
            .parameter(Parameter::new("self"))
            .parameter(Parameter::new("num").typed::<i64>())
            .docstring(
                r#"Multiply the initial value.

        Args:
            num: the multiplier
        "#,
            ),
        )
        .method(
            Method::new("could_you_parse_me", |_: &mut NeedParsing, arguments| {
                let one: String = arguments.get("one");
                let two: i64 = arguments.get("two");
                one.repeat(two as usize)
            })
            .parameter(Parameter::new("self"))
            .parameter(Parameter::new("one").typed::<String>())
            .parameter(Parameter::new("two").typed::<i64>()),
        )
        .build()
        .expect("the NeedParsing class must be well declared");

    println!("{}", parser.parse(None));
}
