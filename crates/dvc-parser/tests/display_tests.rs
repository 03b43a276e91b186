use crate::parser::{GrammarEntryPoint, parse};

fn render(text: &str, entry: GrammarEntryPoint) -> String {
    parse(text, entry).root.to_string()
}

#[test]
fn renders_type_references() {
    assert_eq!(render("List < int >", GrammarEntryPoint::TypeName), "List<int>");
    assert_eq!(render("int [ ]", GrammarEntryPoint::TypeName), "int[]");
    assert_eq!(render("System.Guid?", GrammarEntryPoint::TypeName), "System.Guid?");
}

#[test]
fn renders_expressions() {
    assert_eq!(render("1+2*3", GrammarEntryPoint::Expression), "1 + 2 * 3");
    assert_eq!(render("( 1 )", GrammarEntryPoint::Expression), "(1)");
    assert_eq!(render("[1,'a',2L,1.0]", GrammarEntryPoint::Expression), "[1, \"a\", 2L, 1.0]");
    assert_eq!(render("-x", GrammarEntryPoint::Expression), "-x");
    assert_eq!(render(r#"$"a{b}{{""#, GrammarEntryPoint::Expression), r#"$"a{b}{{""#);
}

#[test]
fn renders_property_declaration() {
    assert_eq!(
        render(
            "int   X=1 ,MarkupOptions.Required=true",
            GrammarEntryPoint::PropertyDeclaration
        ),
        "int X = 1, MarkupOptions.Required = true"
    );
}
