use rankcore::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits_on_whitespace() {
    let words = tokenize("Python  DEVELOPER\twith\nMachine Learning");
    assert_eq!(words, vec!["python", "developer", "with", "machine", "learning"]);
}

#[test]
fn it_keeps_punctuation_and_stopwords() {
    let words = tokenize("The engineer, C++ and Node.js!");
    assert_eq!(words, vec!["the", "engineer,", "c++", "and", "node.js!"]);
}

#[test]
fn it_splits_on_unicode_whitespace() {
    let words = tokenize("Café\u{00A0}Ñandú\u{2003}rust");
    assert_eq!(words, vec!["café", "ñandú", "rust"]);
}
