//! Parsers for the textual output of wmctrl, xprop and ps.

use super::ProcessEntry;
use crate::debug_if_enabled;
use crate::model::{WindowGeometry, WindowId, WindowRecord};
use std::collections::BTreeSet;

const WINDOW_TYPE_PROPERTY: &str = "_NET_WM_WINDOW_TYPE(ATOM)";

/// `wmctrl -lpG`: `id desktop pid x y width height host title...`
pub fn parse_window_list(output: &str) -> Vec<WindowRecord> {
    output
        .lines()
        .filter_map(|line| {
            let window = parse_window_line(line);
            if window.is_none() && !line.trim().is_empty() {
                debug_if_enabled!("Пропускаем нераспознанную строку wmctrl: {:?}", line);
            }
            window
        })
        .collect()
}

fn parse_window_line(line: &str) -> Option<WindowRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 7 {
        return None;
    }

    let workspace = parts[1].parse::<i32>().ok()?;
    let pid = parts[2].parse::<u32>().ok()?;
    let geometry = WindowGeometry::new(
        parts[3].parse().ok()?,
        parts[4].parse().ok()?,
        parts[5].parse().ok()?,
        parts[6].parse().ok()?,
    );

    Some(WindowRecord::new(WindowId::new(parts[0]), workspace, pid, geometry))
}

/// `xprop -id <id> _NET_WM_WINDOW_TYPE`:
/// `_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_NORMAL, _NET_WM_WINDOW_TYPE_DIALOG`
pub fn parse_window_types(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter(|line| line.trim_start().starts_with(WINDOW_TYPE_PROPERTY))
        .filter_map(|line| line.split_once('=').map(|(_, atoms)| atoms))
        .flat_map(|atoms| atoms.split(','))
        .map(str::trim)
        .filter(|atom| !atom.is_empty())
        .map(str::to_string)
        .collect()
}

/// `ps -e -o pid=,args=`
pub fn parse_process_table(output: &str) -> Vec<ProcessEntry> {
    output
        .lines()
        .filter_map(|line| {
            let (pid, command_line) = line.trim().split_once(char::is_whitespace)?;
            Some(ProcessEntry {
                pid: pid.parse().ok()?,
                command_line: command_line.trim().to_string(),
            })
        })
        .collect()
}

/// `wmctrl -d`: строка текущего стола помечена `*`, начало рабочей области в `WA: x,y WxH`
pub fn parse_work_area_origin(output: &str) -> Option<(i32, i32)> {
    let current = output
        .lines()
        .find(|line| line.split_whitespace().nth(1) == Some("*"))?;

    let mut parts = current.split_whitespace();
    parts.find(|part| *part == "WA:")?;
    let (x, y) = parts.next()?.split_once(',')?;

    Some((x.parse().ok()?, y.parse().ok()?))
}
