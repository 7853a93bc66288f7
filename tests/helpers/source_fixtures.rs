//! Common source code fixtures for tests.

pub const CALCULATOR: &str = "class Calculator { int add(int a, int b) { return a + b } }\n";

pub const CALCULATOR_WITH_CALLER: &str = r#"package math

class Calculator {
    int total = 0

    int add(int a, int b) {
        return a + b
    }

    int twice(int x) {
        def doubled = add(x, x)
        total = doubled
        return doubled
    }
}
"#;

pub const SHADOWING: &str = r#"class Counter {
    int count = 0

    void bump(int count) {
        println count
        if (count > 0) {
            def count = 5
            println count
        }
    }

    void reset() {
        count = 0
    }
}
"#;

pub const SCRIPT: &str = r#"def greeting = 'hello'

def shout(String text) {
    text.toUpperCase()
}

[1, 2, 3].each { n ->
    println shout(greeting + n)
}
"#;
