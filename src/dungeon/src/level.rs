// src/dungeon/src/level.rs
//! 单层地牢：地图 + 角色、物品、楼梯的权威列表。

use combat::{Combat, SimRng, experience};
use error::report;
use events::GameEvent;
use items::{Holder, Item, ItemId, Ownable};

use crate::{
    Action, ActionContext, ActionKind, ActionOutcome, ActorId, LevelId, Locatable, Map, PathMode,
    Pathfinder, Position, StairsId,
    actor::Actor,
    brain::InputCode,
    cell::Element,
    stairs::Stairs,
    trap::{Trap, TrapKind},
};

#[derive(Debug)]
pub struct Level {
    id: LevelId,
    map: Map,
    actors: Vec<Actor>,
    items: Vec<Item>,
    stairs: Vec<Stairs>,
}

impl Level {
    pub fn new(id: LevelId, map: Map) -> Self {
        Self {
            id,
            map,
            actors: Vec::new(),
            items: Vec::new(),
            stairs: Vec::new(),
        }
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    #[cfg(test)]
    pub(crate) fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    /// 可以修改属性，但坐标只能通过本关卡的动作改变
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn has_actor(&self, id: ActorId) -> bool {
        self.actor(id).is_some()
    }

    /// 站在 (x, y) 上的角色
    pub fn actors_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Actor> + '_ {
        self.map
            .cell(x, y)
            .map(|cell| cell.actors())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.actor(id))
    }

    // ========== 角色 ==========

    /// 放置角色；格子越界、不可走或被占时原样返还
    pub fn add_actor(&mut self, mut actor: Actor, x: i32, y: i32) -> Result<(), Actor> {
        if !self.map.is_passable(x, y) || self.has_actor(actor.id()) {
            tracing::debug!(actor = %actor.id(), x, y, level = %self.id, "cannot place actor");
            return Err(actor);
        }
        let Some(cell) = self.map.cell_mut(x, y) else {
            return Err(actor);
        };
        cell.actors.push(actor.id());
        actor.place(self.id, Position::new(x, y));
        self.actors.push(actor);
        Ok(())
    }

    /// 放到第一个空闲格子（行优先）
    pub fn add_actor_to_free_cell(&mut self, actor: Actor) -> Result<Position, Actor> {
        match self.map.get_free().first().copied() {
            Some(p) => self.add_actor(actor, p.x, p.y).map(|_| p),
            None => Err(actor),
        }
    }

    /// 放到随机的空闲格子
    pub fn add_actor_to_random_cell(
        &mut self,
        actor: Actor,
        rng: &mut SimRng,
    ) -> Result<Position, Actor> {
        let free = self.map.get_free();
        match rng.choose(&free).copied() {
            Some(p) => self.add_actor(actor, p.x, p.y).map(|_| p),
            None => Err(actor),
        }
    }

    /// 先从角色列表、再从格子中移除
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id() == id)?;
        let mut actor = self.actors.remove(index);
        let pos = actor.position();
        match self.map.cell_mut(pos.x, pos.y) {
            Some(cell) => cell.actors.retain(|&other| other != id),
            None => report::invariant("Level", "remove_actor", format!("{} stood off the map", id)),
        }
        actor.detach();
        Some(actor)
    }

    /// 移动到 (x, y)；目标不可通行时什么都不改变
    pub fn move_actor_to(&mut self, id: ActorId, x: i32, y: i32) -> bool {
        if !self.map.is_passable(x, y) {
            return false;
        }
        let Some(actor) = self.actors.iter_mut().find(|a| a.id() == id) else {
            report::contract("Level", "move_actor_to", format!("{} is not on {}", id, self.id));
            return false;
        };

        let from = actor.position();
        if let Some(cell) = self.map.cell_mut(from.x, from.y) {
            cell.actors.retain(|&other| other != id);
        }
        if let Some(cell) = self.map.cell_mut(x, y) {
            cell.actors.push(id);
        }
        actor.place(self.id, Position::new(x, y));
        true
    }

    // ========== 决策与动作 ==========

    /// 让角色的大脑决定下一步；大脑在决策期间被暂时取出
    pub fn decide(
        &mut self,
        id: ActorId,
        input: Option<InputCode>,
        rng: &mut SimRng,
    ) -> Option<ActionKind> {
        let Some(mut brain) = self.actor_mut(id).and_then(Actor::take_brain) else {
            report::contract("Level", "decide", format!("{} has no brain on {}", id, self.id));
            return None;
        };
        let decision = self
            .actor(id)
            .and_then(|actor| brain.decide(actor, self, input, rng));
        if let Some(actor) = self.actor_mut(id) {
            actor.restore_brain(brain);
        }
        decision
    }

    /// 执行动作。楼梯只在这里校验，跨关卡的移动由 `World` 完成。
    pub fn execute(&mut self, id: ActorId, action: &Action, ctx: &mut ActionContext) -> ActionOutcome {
        let Some(pos) = self.actor(id).map(Locatable::position) else {
            report::contract("Level", "execute", format!("{} is not on {}", id, self.id));
            return ActionOutcome::Failed;
        };

        let done = match action.kind {
            ActionKind::Move { dx, dy } => {
                let to = pos.offset(dx, dy);
                let moved = self.move_actor_to(id, to.x, to.y);
                if moved {
                    ctx.bus.publish(GameEvent::ActorMoved {
                        actor: id.0,
                        from: (pos.x, pos.y),
                        to: (to.x, to.y),
                    });
                    self.spring_traps(id, to, ctx);
                }
                moved
            }
            ActionKind::Attack { x, y } => self.attack_with(id, x, y, ctx),
            ActionKind::Pickup => self.pickup_item(id, ctx),
            ActionKind::UseStairs => {
                return match self.stairs_under(pos).and_then(Stairs::target) {
                    Some(link) => ActionOutcome::Transit(link),
                    None => ActionOutcome::Failed,
                };
            }
            ActionKind::Idle => true,
        };

        if done {
            ActionOutcome::Done
        } else {
            ActionOutcome::Failed
        }
    }

    /// 攻击 (x, y) 上的角色，并处理死亡
    pub fn attack_with(&mut self, id: ActorId, x: i32, y: i32, ctx: &mut ActionContext) -> bool {
        let Some(defender_id) = self
            .map
            .cell(x, y)
            .and_then(|cell| cell.actors().first().copied())
        else {
            return false;
        };
        if defender_id == id {
            return false;
        }
        let level = self.id;
        let Some((attacker, defender)) = self.actor_pair_mut(id, defender_id) else {
            report::contract("Level", "attack_with", format!("{} is not on {}", id, level));
            return false;
        };

        let result = Combat::resolve_attack(&*attacker, defender, &mut *ctx.roll);
        for line in result.logs {
            ctx.bus.publish(GameEvent::message(line));
        }
        if result.defeated {
            self.kill_actor(id, defender_id, ctx);
        }
        true
    }

    fn kill_actor(&mut self, killer: ActorId, victim: ActorId, ctx: &mut ActionContext) {
        let Some(dead) = self.remove_actor(victim) else {
            report::invariant("Level", "kill_actor", format!("couldn't kill actor {}", victim));
            return;
        };
        ctx.bus
            .publish(GameEvent::message(format!("{} was killed.", dead.name)));

        if let Some(attacker) = self.actor_mut(killer) {
            if let Some(new_level) = experience::award(attacker, dead.stats.exp_level) {
                let text = format!("{} advanced to level {}", attacker.name, new_level);
                ctx.bus.publish(GameEvent::message(text));
                ctx.bus.publish(GameEvent::ActorLeveledUp {
                    actor: killer.0,
                    new_level,
                });
            }
        }

        tracing::debug!(killer = %killer, victim = %victim, level = %self.id, "actor killed");
        ctx.bus.publish(GameEvent::ActorKilled {
            actor: victim.0,
            name: dead.name.clone(),
            level: self.id.0,
            was_player: dead.is_player(),
        });
    }

    fn actor_pair_mut(&mut self, a: ActorId, b: ActorId) -> Option<(&mut Actor, &mut Actor)> {
        let i = self.actors.iter().position(|actor| actor.id() == a)?;
        let j = self.actors.iter().position(|actor| actor.id() == b)?;
        if i < j {
            let (left, right) = self.actors.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else if j < i {
            let (left, right) = self.actors.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        } else {
            None
        }
    }

    // ========== 物品 ==========

    /// 把物品放在 (x, y) 的地面上
    pub fn add_item(&mut self, mut item: Item, x: i32, y: i32) -> Result<(), Item> {
        let walkable = self
            .map
            .cell(x, y)
            .is_some_and(|cell| cell.terrain.is_walkable());
        if !walkable {
            return Err(item);
        }
        item.set_owner(Holder::Cell {
            level: self.id.0,
            x,
            y,
        });
        if let Some(cell) = self.map.cell_mut(x, y) {
            cell.items.push(item.id);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn add_item_to_random_cell(&mut self, item: Item, rng: &mut SimRng) -> Result<Position, Item> {
        let free = self.map.get_free();
        match rng.choose(&free).copied() {
            Some(p) => self.add_item(item, p.x, p.y).map(|_| p),
            None => Err(item),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 拾取脚下的第一个物品放进背包
    pub fn pickup_item(&mut self, id: ActorId, ctx: &mut ActionContext) -> bool {
        let Some(actor) = self.actors.iter_mut().find(|a| a.id() == id) else {
            report::contract("Level", "pickup_item", format!("{} is not on {}", id, self.id));
            return false;
        };
        let pos = actor.position();
        let Some(cell) = self.map.cell_mut(pos.x, pos.y) else {
            report::invariant("Level", "pickup_item", format!("{} stood off the map", id));
            return false;
        };
        let Some(&item_id) = cell.items.first() else {
            ctx.bus.publish(GameEvent::message("Nothing to pickup!"));
            return false;
        };
        // 两处都找到才移除，否则保持原样
        let Some(index) = self.items.iter().position(|item| item.id == item_id) else {
            report::invariant(
                "Level",
                "pickup_item",
                format!("item {} was on a cell but not on {}", item_id.0, self.id),
            );
            return false;
        };

        cell.items.remove(0);
        let item = self.items.remove(index);
        actor.inv_eq.add_item(item);
        ctx.bus.publish(GameEvent::message(format!(
            "{} picked up an item!",
            actor.name
        )));
        ctx.bus.publish(GameEvent::ItemPickedUp {
            actor: id.0,
            item: item_id.0,
        });
        true
    }

    // ========== 楼梯与陷阱 ==========

    /// 放置楼梯，同时登记到格子的元素列表
    pub fn add_stairs(&mut self, mut stairs: Stairs, x: i32, y: i32) -> Result<(), Stairs> {
        let Some(cell) = self
            .map
            .cell_mut(x, y)
            .filter(|cell| cell.terrain.is_walkable())
        else {
            return Err(stairs);
        };
        cell.elements.push(Element::Stairs {
            id: stairs.id(),
            dir: stairs.dir(),
        });
        stairs.place(self.id, Position::new(x, y));
        self.stairs.push(stairs);
        Ok(())
    }

    pub fn stairs(&self, id: StairsId) -> Option<&Stairs> {
        self.stairs.iter().find(|s| s.id() == id)
    }

    pub(crate) fn stairs_mut(&mut self, id: StairsId) -> Option<&mut Stairs> {
        self.stairs.iter_mut().find(|s| s.id() == id)
    }

    fn stairs_under(&self, pos: Position) -> Option<&Stairs> {
        let (id, _) = self.map.cell(pos.x, pos.y)?.stairs()?;
        self.stairs(id)
    }

    /// 通往 `target` 的楼梯
    pub fn get_stairs(&self, target: LevelId) -> Option<&Stairs> {
        self.stairs
            .iter()
            .find(|s| s.target_level() == Some(target))
    }

    pub fn add_trap(&mut self, trap: Trap, x: i32, y: i32) -> bool {
        match self.map.cell_mut(x, y) {
            Some(cell) if cell.terrain.is_walkable() => {
                cell.traps.push(trap);
                true
            }
            _ => false,
        }
    }

    pub fn add_trap_to_random_cell(&mut self, trap: Trap, rng: &mut SimRng) -> Option<Position> {
        let free = self.map.get_free();
        let p = rng.choose(&free).copied()?;
        self.add_trap(trap, p.x, p.y).then_some(p)
    }

    /// 显示格子上隐藏的陷阱，返回新显形的种类
    pub fn reveal_traps(&mut self, x: i32, y: i32) -> Vec<TrapKind> {
        let Some(cell) = self.map.cell_mut(x, y) else {
            return Vec::new();
        };
        cell.traps
            .iter_mut()
            .filter(|trap| !trap.is_visible())
            .map(|trap| {
                trap.reveal();
                trap.kind()
            })
            .collect()
    }

    fn spring_traps(&mut self, id: ActorId, at: Position, ctx: &mut ActionContext) {
        let found = self.reveal_traps(at.x, at.y);
        if found.is_empty() {
            return;
        }
        let name = self.actor(id).map(|a| a.name.clone()).unwrap_or_default();
        for kind in found {
            tracing::debug!(actor = %id, kind = %kind, x = at.x, y = at.y, "trap revealed");
            ctx.bus
                .publish(GameEvent::message(format!("{} triggered the {} trap!", name, kind)));
        }
    }

    // ========== 视野 ==========

    pub fn visible_cells_for(&self, id: ActorId) -> Vec<Position> {
        self.actor(id)
            .map(|actor| self.map.visible_cells(actor.position(), actor.fov_range))
            .unwrap_or_default()
    }

    /// 返回角色看到的格子；玩家看到的格子会被标记为已探索
    pub fn explore_cells(&mut self, id: ActorId) -> Vec<Position> {
        let seen = self.visible_cells_for(id);
        if self.actor(id).is_some_and(Actor::is_player) {
            self.map.mark_explored(&seen);
        }
        seen
    }

    /// 角色所在格子视为可通行的寻路
    pub fn path_for(&self, id: ActorId, target: Position) -> Vec<Position> {
        let Some(own) = self.actor(id).map(Locatable::position) else {
            return Vec::new();
        };
        let passable = |x: i32, y: i32| (x == own.x && y == own.y) || self.map.is_passable(x, y);
        Pathfinder::shortest_path(own, target, &PathMode::Obstacles(&passable))
    }
}
