//! 游戏循环
//!
//! 每一步：从调度器取出下一个行动者 → 大脑决策 → 执行动作 → 汇报耗时。
//! 玩家的回合会一直等待输入，空动作不消耗回合。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use combat::SimRng;
use dungeon::{
    Action, ActionContext, Actor, ActorId, InputCode, Level, LevelId, Map, Position, StairsDir,
    StairsId, Trap, World,
};
use error::{SimError, report};
use events::{EventBus, EventHandler, GameEvent, MessageLog, TracingHandler};
use items::Item;

use crate::{
    core::{EventId, TimedEvent},
    scheduler::{Scheduler, TurnTaker},
};

/// `Game::step` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// 一个行动者或事件完成了回合
    Acted,
    /// 轮到玩家，但没有输入
    AwaitingInput,
    /// 输入没有对应的动作，玩家仍在等待
    InputRejected,
    GameOver,
    /// 调度器中没有任何行动者
    Exhausted,
}

/// 游戏上下文：持有世界、调度器、事件总线与随机数
pub struct Game {
    world: World,
    scheduler: Scheduler,
    bus: EventBus,
    rng: SimRng,
    players: Vec<ActorId>,
    shown_level: Option<LevelId>,
    game_over: bool,
    /// 等待输入的玩家回合
    pending: Option<TurnTaker>,
    events: BTreeMap<EventId, Box<dyn TimedEvent>>,
    next_event: u32,
    messages: Arc<Mutex<Vec<String>>>,
    action_duration: u64,
}

impl Game {
    pub fn new(seed: u64, action_duration: u64) -> Self {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe("Message", Box::new(MessageLog::new(messages.clone())));
        bus.subscribe_all(Box::new(TracingHandler));

        Self {
            world: World::new(),
            scheduler: Scheduler::new(),
            bus,
            rng: SimRng::new(seed),
            players: Vec::new(),
            shown_level: None,
            game_over: false,
            pending: None,
            events: BTreeMap::new(),
            next_event: 0,
            messages,
            action_duration,
        }
    }

    // ========== 访问器 ==========

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    pub fn players(&self) -> &[ActorId] {
        &self.players
    }

    pub fn player(&self) -> Option<ActorId> {
        self.players.first().copied()
    }

    /// 当前应当显示的关卡，跟随玩家
    pub fn shown_level(&self) -> Option<&Level> {
        self.shown_level.and_then(|id| self.world.level(id))
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn current_time(&self) -> u64 {
        self.scheduler.current_time()
    }

    pub fn action_duration(&self) -> u64 {
        self.action_duration
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|logs| logs.clone())
            .unwrap_or_default()
    }

    pub fn clear_messages(&mut self) {
        if let Ok(mut logs) = self.messages.lock() {
            logs.clear();
        }
    }

    // ========== 组装 ==========

    pub fn add_level(&mut self, map: Map) -> LevelId {
        self.world.add_level(map)
    }

    /// 把玩家放到第一层的第一个空闲格子
    pub fn add_player(&mut self, actor: Actor) -> Result<Position, SimError> {
        if self.world.is_empty() {
            report::contract("Game", "add_player", "no levels exist");
            return Err(SimError::NoLevels);
        }
        self.add_actor_to_level(actor, LevelId(0))
    }

    /// 放到关卡的第一个空闲格子并加入调度
    pub fn add_actor_to_level(&mut self, actor: Actor, level: LevelId) -> Result<Position, SimError> {
        let id = actor.id();
        let is_player = actor.is_player();
        let target = self
            .world
            .level_mut(level)
            .ok_or(SimError::UnknownLevel(level.0))?;
        let pos = target
            .add_actor_to_free_cell(actor)
            .map_err(|_| SimError::NoFreeCell(level.0))?;
        self.register(id, is_player, level);
        Ok(pos)
    }

    /// 放到随机空闲格子并加入调度
    pub fn add_actor_to_random_cell(
        &mut self,
        actor: Actor,
        level: LevelId,
    ) -> Result<Position, SimError> {
        let id = actor.id();
        let is_player = actor.is_player();
        let target = self
            .world
            .level_mut(level)
            .ok_or(SimError::UnknownLevel(level.0))?;
        let pos = target
            .add_actor_to_random_cell(actor, &mut self.rng)
            .map_err(|_| SimError::NoFreeCell(level.0))?;
        self.register(id, is_player, level);
        Ok(pos)
    }

    /// 放到指定格子并加入调度
    pub fn add_actor_at(&mut self, actor: Actor, level: LevelId, x: i32, y: i32) -> Result<(), SimError> {
        let id = actor.id();
        let is_player = actor.is_player();
        let target = self
            .world
            .level_mut(level)
            .ok_or(SimError::UnknownLevel(level.0))?;
        target.add_actor(actor, x, y).map_err(|_| SimError::CellBlocked {
            level: level.0,
            x,
            y,
        })?;
        self.register(id, is_player, level);
        Ok(())
    }

    /// 把物品放到随机空闲格子
    pub fn add_item_to_random_cell(&mut self, item: Item, level: LevelId) -> Result<Position, SimError> {
        self.world
            .level_mut(level)
            .ok_or(SimError::UnknownLevel(level.0))?
            .add_item_to_random_cell(item, &mut self.rng)
            .map_err(|_| SimError::NoFreeCell(level.0))
    }

    /// 把隐藏的陷阱放到随机空闲格子
    pub fn add_trap_to_random_cell(&mut self, trap: Trap, level: LevelId) -> Result<Position, SimError> {
        self.world
            .level_mut(level)
            .ok_or(SimError::UnknownLevel(level.0))?
            .add_trap_to_random_cell(trap, &mut self.rng)
            .ok_or(SimError::NoFreeCell(level.0))
    }

    /// 在随机空闲格子上放一个尚未配对的楼梯
    pub fn add_stairs_to_random_cell(
        &mut self,
        level: LevelId,
        dir: StairsDir,
    ) -> Result<StairsId, SimError> {
        let free = self
            .world
            .level(level)
            .ok_or(SimError::UnknownLevel(level.0))?
            .map()
            .get_free();
        let pos = self
            .rng
            .choose(&free)
            .copied()
            .ok_or(SimError::NoFreeCell(level.0))?;
        self.world
            .add_stairs(level, dir, pos.x, pos.y)
            .ok_or(SimError::CellBlocked {
                level: level.0,
                x: pos.x,
                y: pos.y,
            })
    }

    fn register(&mut self, id: ActorId, is_player: bool, level: LevelId) {
        self.scheduler.add(TurnTaker::Actor(id), true, 0);
        if is_player {
            self.players.push(id);
            if self.shown_level.is_none() {
                self.shown_level = Some(level);
            }
            if let Some(level) = self.world.level_mut(level) {
                level.explore_cells(id);
            }
            tracing::debug!(player = %id, "player added");
        }
    }

    /// 加入一个定时事件，立即排队
    pub fn add_event(&mut self, event: Box<dyn TimedEvent>) -> EventId {
        let id = EventId(self.next_event);
        self.next_event += 1;
        self.events.insert(id, event);
        self.scheduler.add(TurnTaker::Event(id), true, 0);
        id
    }

    // ========== 循环 ==========

    /// 推进一个回合。`input` 只交给玩家的大脑。
    pub fn step(&mut self, input: Option<InputCode>) -> StepOutcome {
        if self.game_over {
            return StepOutcome::GameOver;
        }
        let Some(taker) = self.pending.take().or_else(|| self.scheduler.next()) else {
            return StepOutcome::Exhausted;
        };

        let outcome = match taker {
            TurnTaker::Event(id) => {
                self.fire_event(id);
                StepOutcome::Acted
            }
            TurnTaker::Actor(id) => self.act(id, input),
        };
        self.process_events();

        if self.game_over {
            StepOutcome::GameOver
        } else {
            outcome
        }
    }

    /// 按输入脚本运行，直到游戏结束、调度器为空、输入耗尽或达到步数上限
    pub fn run<I>(&mut self, inputs: I, max_steps: usize) -> StepOutcome
    where
        I: IntoIterator<Item = InputCode>,
    {
        let mut inputs = inputs.into_iter();
        let mut input = None;
        let mut last = StepOutcome::Acted;
        for _ in 0..max_steps {
            last = self.step(input.take());
            match last {
                StepOutcome::Acted => {}
                StepOutcome::AwaitingInput | StepOutcome::InputRejected => match inputs.next() {
                    Some(code) => input = Some(code),
                    None => break,
                },
                StepOutcome::GameOver | StepOutcome::Exhausted => break,
            }
        }
        tracing::info!(time = self.current_time(), outcome = ?last, "run finished");
        last
    }

    fn fire_event(&mut self, id: EventId) {
        match self.events.get_mut(&id) {
            Some(event) => {
                event.fire(&mut self.world, &mut self.bus);
                self.scheduler.report_duration(event.interval());
            }
            None => {
                report::contract("Game", "fire_event", format!("unknown event {:?}", id));
                self.scheduler.remove(TurnTaker::Event(id));
            }
        }
    }

    fn act(&mut self, id: ActorId, input: Option<InputCode>) -> StepOutcome {
        let taker = TurnTaker::Actor(id);
        let Some(level) = self.world.find_actor(id) else {
            report::contract("Game", "act", format!("{} is scheduled but not on any level", id));
            self.scheduler.remove(taker);
            return StepOutcome::Acted;
        };
        let is_player = self.players.contains(&id);
        let input = if is_player { input } else { None };

        let decision = self
            .world
            .level_mut(level)
            .and_then(|current| current.decide(id, input, &mut self.rng));
        let Some(kind) = decision else {
            if is_player {
                self.pending = Some(taker);
                return if input.is_some() {
                    StepOutcome::InputRejected
                } else {
                    StepOutcome::AwaitingInput
                };
            }
            self.scheduler.report_duration(self.action_duration);
            return StepOutcome::Acted;
        };

        let action = Action::new(kind, self.action_duration);
        let mut ctx = ActionContext {
            bus: &mut self.bus,
            roll: &mut self.rng,
        };
        let done = self.world.execute(level, id, &action, &mut ctx);
        tracing::debug!(actor = %id, action = ?action.kind, done, "action executed");
        self.scheduler.report_duration(action.duration);

        if is_player {
            if let Some(current) = self.world.find_actor(id) {
                if let Some(level) = self.world.level_mut(current) {
                    level.explore_cells(id);
                }
            }
        }
        StepOutcome::Acted
    }

    /// 按发布顺序处理队列中的事件，直到队列为空
    ///
    /// 订阅者归总线所有，而调度器归 `Game` 所有，所以调度器不订阅总线，
    /// 由这里把每个事件交给它的 `EventHandler` 实现。处理过程中新发布的
    /// 事件（如 `GameOver`）在下一轮被取出。
    fn process_events(&mut self) {
        loop {
            let published: Vec<GameEvent> = self.bus.drain().collect();
            if published.is_empty() {
                break;
            }
            for event in &published {
                self.scheduler.handle(event);
                match event {
                    GameEvent::ActorKilled { actor, .. } => self.on_actor_killed(ActorId(*actor)),
                    GameEvent::LevelChanged {
                        actor,
                        to,
                        was_player: true,
                        ..
                    } => {
                        if self.player() == Some(ActorId(*actor)) {
                            self.shown_level = Some(LevelId(*to));
                        }
                    }
                    GameEvent::GameOver => {
                        self.game_over = true;
                        tracing::info!(time = self.current_time(), "game over");
                    }
                    _ => {}
                }
            }
        }
    }

    fn on_actor_killed(&mut self, actor: ActorId) {
        if self.pending == Some(TurnTaker::Actor(actor)) {
            self.pending = None;
        }
        let bound: Vec<EventId> = self
            .events
            .iter()
            .filter(|(_, event)| event.actor() == Some(actor))
            .map(|(&id, _)| id)
            .collect();
        for id in bound {
            self.events.remove(&id);
            self.scheduler.remove(TurnTaker::Event(id));
        }

        if let Some(index) = self.players.iter().position(|&p| p == actor) {
            self.players.remove(index);
            if self.players.is_empty() {
                self.bus.publish(GameEvent::message("GAME OVER!"));
                self.bus.publish(GameEvent::GameOver);
            }
        }
    }
}
