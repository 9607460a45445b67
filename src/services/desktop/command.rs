use crate::debug_if_enabled;
use std::process::Command;
use tracing::warn;

/// Выполнить внешнюю утилиту и вернуть её stdout.
/// Любая ошибка (нет утилиты, ненулевой код) даёт пустую строку.
pub fn run_capture(program: &str, args: &[&str]) -> String {
    debug_if_enabled!("Выполняем: {} {}", program, args.join(" "));

    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            warn!("{} не найден или не запускается: {}", program, e);
            return String::new();
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug_if_enabled!("{} {} вернул ошибку: {}", program, args.join(" "), stderr.trim());
        return String::new();
    }

    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Выполнить внешнюю утилиту ради кода возврата
pub fn run_status(program: &str, args: &[&str]) -> bool {
    debug_if_enabled!("Выполняем: {} {}", program, args.join(" "));

    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            warn!(
                "{} {} вернул ошибку: {}",
                program,
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            false
        }
        Err(e) => {
            warn!("{} не найден или не запускается: {}", program, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_yields_empty_output() {
        assert_eq!(run_capture("definitely-not-a-real-tool-7f3a", &["-l"]), "");
        assert!(!run_status("definitely-not-a-real-tool-7f3a", &[]));
    }
}
