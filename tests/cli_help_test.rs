#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn test_cli_help_output() {
        for flag in ["--help", "-h"] {
            let mut cmd = Command::cargo_bin("ctx").unwrap();
            // help must not read the kubeconfig
            cmd.env("KUBECONFIG", "/nonexistent/ctx-help-test/config")
                .env_remove("RUST_LOG")
                .arg(flag)
                .assert()
                .success()
                .stdout(predicate::str::contains("Usage:"))
                .stdout(predicate::str::contains("ctx use <context> [namespace]"))
                .stdout(predicate::str::contains("ctx rm <context>"))
                .stderr(predicate::str::is_empty());
        }
    }

    #[test]
    fn test_unknown_command_prints_usage() {
        let mut cmd = Command::cargo_bin("ctx").unwrap();
        cmd.env("KUBECONFIG", "/nonexistent/ctx-help-test/config")
            .env_remove("RUST_LOG")
            .arg("switch")
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::starts_with(
                "Error: unknown command 'switch'\n\n",
            ))
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_missing_context_name() {
        for (command, usage) in [
            ("use", "Usage: ctx use <context> [namespace]"),
            ("rm", "Usage: ctx rm <context>"),
        ] {
            let mut cmd = Command::cargo_bin("ctx").unwrap();
            cmd.env("KUBECONFIG", "/nonexistent/ctx-help-test/config")
                .env_remove("RUST_LOG")
                .arg(command)
                .assert()
                .code(1)
                .stderr(predicate::str::contains("Error: context name required"))
                .stderr(predicate::str::contains(usage));
        }
    }

    #[test]
    fn test_list_and_version_are_unknown_commands() {
        for arg in ["list", "--version", "-V"] {
            let mut cmd = Command::cargo_bin("ctx").unwrap();
            cmd.env("KUBECONFIG", "/nonexistent/ctx-help-test/config")
                .env_remove("RUST_LOG")
                .arg(arg)
                .assert()
                .code(1)
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::starts_with(format!(
                    "Error: unknown command '{}'\n",
                    arg
                )));
        }
    }
}
