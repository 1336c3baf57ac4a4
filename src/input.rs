//! 键盘输入到 `InputCode` 的映射

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use dungeon::InputCode;

/// 单个按键对应的输入码
pub fn map_key(key: KeyCode) -> Option<InputCode> {
    let code = match key {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => InputCode::MoveNorth,
            'x' => InputCode::MoveSouth,
            'a' => InputCode::MoveWest,
            'd' => InputCode::MoveEast,
            'q' => InputCode::MoveNorthWest,
            'e' => InputCode::MoveNorthEast,
            'z' => InputCode::MoveSouthWest,
            'c' => InputCode::MoveSouthEast,
            's' => InputCode::Idle,
            '.' => InputCode::Pickup,
            ' ' => InputCode::UseStairs,
            _ => return None,
        },
        KeyCode::Up => InputCode::MoveNorth,
        KeyCode::Down => InputCode::MoveSouth,
        KeyCode::Left => InputCode::MoveWest,
        KeyCode::Right => InputCode::MoveEast,
        _ => return None,
    };
    Some(code)
}

/// 终端按键事件，只响应按下
pub fn map_key_event(event: KeyEvent) -> Option<InputCode> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    map_key(event.code)
}

/// 把按键字符串解析成输入脚本，无法识别的字符被跳过
pub fn parse_script(keys: &str) -> Vec<InputCode> {
    keys.chars()
        .filter_map(|c| map_key(KeyCode::Char(c)))
        .collect()
}
