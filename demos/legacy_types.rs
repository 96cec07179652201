use argplan::{Function, Parameter, ValueType};

fn main() {
    // Types given as a list, in parameter order, rather than on each parameter.
    let concatenate = Function::new("concatenate", |arguments| {
        let word: String = arguments.get("word");
        let times: usize = arguments.get("times");
        let separator: String = arguments.get("separator");
        vec![word; times].join(&separator)
    })
    .parameter(Parameter::new("word"))
    .parameter(Parameter::new("times"))
    .parameter(Parameter::new("separator").default(" ".to_string()))
    .types([ValueType::of::<String>(), ValueType::of::<usize>()])
    .docstring(
        r#"Repeat a word.

        Args:
            word: the word to repeat
            times: how many times
            separator: placed between each word
        "#,
    );

    println!("{}", concatenate.parse());
}
