#[macro_export]
macro_rules! assert_env_eq {
    ($vars:expr, $fixture:expr) => {
        for (key, expected_value) in $fixture {
            let actual_value = $vars.get(*key);

            assert!(actual_value.is_some(), "{key} is expected to be set, but isn't");
            let actual_value = actual_value.unwrap();
            assert_eq!(
                *expected_value,
                actual_value.as_str(),
                "{key} is expected to be {expected_value:?}, but is {actual_value:?}"
            );
        }
    };
}
