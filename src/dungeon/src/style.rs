//! 格子外观：样式类名与字符
//!
//! 优先级：未探索 > 物品 > 角色 > 可见陷阱 > 地图元素 > 基础地形。

use crate::{ActorKind, Level, StairsDir, Terrain};

/// 格子的样式类名
pub fn style_class(level: &Level, x: i32, y: i32) -> &'static str {
    let map = level.map();
    let Some(cell) = map.cell(x, y) else {
        return "cell-not-explored";
    };
    if !cell.is_explored() {
        return "cell-not-explored";
    }
    if cell.has_items() {
        return "cell-items";
    }
    if let Some(actor) = level.actors_at(x, y).next() {
        return match actor.kind() {
            ActorKind::Player => "cell-player",
            ActorKind::Monster => "cell-monster",
        };
    }
    if cell.traps().iter().any(|trap| trap.is_visible()) {
        return "cell-traps";
    }
    if !cell.elements().is_empty() {
        return "cell-elements";
    }
    match cell.terrain {
        Terrain::Wall => "cell-element-wall",
        Terrain::Floor => "cell-element-floor",
    }
}

/// 格子的显示字符
pub fn glyph(level: &Level, x: i32, y: i32) -> char {
    let Some(cell) = level.map().cell(x, y).filter(|cell| cell.is_explored()) else {
        return ' ';
    };
    if cell.has_items() {
        '('
    } else if cell.has_actors() {
        '@'
    } else if cell.terrain == Terrain::Wall {
        '#'
    } else {
        match cell.stairs() {
            Some((_, StairsDir::Down)) => '>',
            Some((_, StairsDir::Up)) => '<',
            None => ' ',
        }
    }
}

/// 整层的字符画，每行一个字符串
pub fn render_rows(level: &Level) -> Vec<String> {
    let map = level.map();
    (0..map.rows())
        .map(|y| (0..map.cols()).map(|x| glyph(level, x, y)).collect())
        .collect()
}
