#[test]
fn trycmd_tests() {
    let tc = trycmd::TestCases::new();

    tc.insert_var("[VERSION]", env!("CARGO_PKG_VERSION"))
        .unwrap();
    tc.case("tests/end-to-end/*.toml");

    tc.run();
}
