use super::command::{run_capture, run_status};
use super::parse;
use super::r#trait::{Desktop, Directive, LaunchCommand, LaunchOutcome, ProcessEntry};
use crate::error::{Result, SessionError};
use crate::model::{WindowId, WindowRecord};
use std::collections::BTreeSet;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// X11-рабочий стол через wmctrl, xprop, ps и xrandr
pub struct X11Desktop;

impl X11Desktop {
    pub fn new() -> Self {
        Self
    }

    pub fn test(&self) -> Result<()> {
        let output = Command::new("wmctrl").arg("-m").output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(SessionError::Io(std::io::Error::other(format!(
                "wmctrl вернул ошибку: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))))
        }
    }
}

fn wmctrl_args(id: &WindowId, directive: &Directive) -> Vec<String> {
    let mut args = vec!["-i".to_string(), "-r".to_string(), id.to_string()];
    match directive {
        Directive::RemoveMaximizedHorz => {
            args.extend(["-b".to_string(), "remove,maximized_horz".to_string()]);
        }
        Directive::RemoveMaximizedVert => {
            args.extend(["-b".to_string(), "remove,maximized_vert".to_string()]);
        }
        Directive::MoveToWorkspace(workspace) => {
            args.extend(["-t".to_string(), workspace.to_string()]);
        }
        Directive::MoveResize(geometry) => {
            args.extend([
                "-e".to_string(),
                format!(
                    "0,{},{},{},{}",
                    geometry.x, geometry.y, geometry.width, geometry.height
                ),
            ]);
        }
    }
    args
}

#[async_trait::async_trait]
impl Desktop for X11Desktop {
    async fn list_windows(&self) -> Vec<WindowRecord> {
        parse::parse_window_list(&run_capture("wmctrl", &["-l", "-p", "-G"]))
    }

    async fn window_type_flags(&self, id: &WindowId) -> BTreeSet<String> {
        parse::parse_window_types(&run_capture(
            "xprop",
            &["-id", id.as_str(), "_NET_WM_WINDOW_TYPE"],
        ))
    }

    async fn process_name(&self, pid: u32) -> String {
        if pid == 0 {
            return String::new();
        }
        let pid = pid.to_string();
        run_capture("ps", &["-p", &pid, "-o", "comm="]).trim().to_string()
    }

    async fn process_table(&self) -> Vec<ProcessEntry> {
        parse::parse_process_table(&run_capture("ps", &["-e", "-o", "pid=,args="]))
    }

    async fn monitor_listing(&self) -> String {
        run_capture("xrandr", &["--listmonitors"])
    }

    async fn work_area_origin(&self) -> Option<(i32, i32)> {
        parse::parse_work_area_origin(&run_capture("wmctrl", &["-d"]))
    }

    async fn launch(&self, command: &LaunchCommand) -> LaunchOutcome {
        let spawned = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn();

        match spawned {
            Ok(child) => {
                let pid = child.id();
                debug!("Запущен '{}' с pid {}", command, pid);
                LaunchOutcome::Spawned { pid }
            }
            Err(e) => {
                warn!("Не удалось запустить '{}': {}", command, e);
                LaunchOutcome::Failed(e.to_string())
            }
        }
    }

    async fn apply(&self, id: &WindowId, directive: &Directive) -> bool {
        let args = wmctrl_args(id, directive);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_status("wmctrl", &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WindowGeometry;

    #[test]
    fn test_wmctrl_args_for_directives() {
        let id = WindowId::new("0x03a00003");

        assert_eq!(
            wmctrl_args(&id, &Directive::RemoveMaximizedHorz),
            vec!["-i", "-r", "0x03a00003", "-b", "remove,maximized_horz"]
        );
        assert_eq!(
            wmctrl_args(&id, &Directive::MoveToWorkspace(2)),
            vec!["-i", "-r", "0x03a00003", "-t", "2"]
        );
        assert_eq!(
            wmctrl_args(&id, &Directive::MoveResize(WindowGeometry::new(10, 20, 800, 600))),
            vec!["-i", "-r", "0x03a00003", "-e", "0,10,20,800,600"]
        );
    }
}
