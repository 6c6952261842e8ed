use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::{
    components::{Animal, Climate, Diet, Employee, Gender, Habitat, Health, Role, UnknownRole},
    config::Rules,
    enclosure::{Enclosure, MAX_LEVEL},
    error::ZooError,
    market::{Market, MarketOffer},
    rng::RandomSource,
    valuation,
};

/// Position of an enclosure in build order. Enclosures are never removed, so ids stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EnclosureId(pub usize);

impl fmt::Display for EnclosureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZooSummary {
    pub name: String,
    pub day: u32,
    pub money: i64,
    pub food: i64,
    pub popularity: i64,
    pub visitors: i64,
    pub animals: usize,
    pub infected: usize,
    pub enclosures: usize,
    pub employees: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalView {
    pub index: usize,
    pub name: String,
    pub species: String,
    pub age_days: u32,
    pub weight: u32,
    pub climate: Climate,
    pub diet: Diet,
    pub habitat: Habitat,
    pub gender: Gender,
    pub health: Health,
    pub lineage: String,
    pub price: i64,
    pub sell_value: i64,
    pub maintenance: i64,
}

impl AnimalView {
    fn new(index: usize, animal: &Animal) -> Self {
        Self {
            index,
            name: animal.name.clone(),
            species: animal.species.clone(),
            age_days: animal.age_days,
            weight: animal.weight,
            climate: animal.climate,
            diet: animal.diet,
            habitat: animal.habitat,
            gender: animal.gender,
            health: animal.health,
            lineage: animal.parents_label(),
            price: valuation::price(animal),
            sell_value: valuation::sell_value(animal),
            maintenance: valuation::maintenance_cost(animal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnclosureView {
    pub id: EnclosureId,
    pub climate: Climate,
    pub capacity: u32,
    pub level: u8,
    pub daily_cost: i64,
    pub upgrade_cost: Option<i64>,
    pub animals: Vec<AnimalView>,
}

/// The aggregate root: one zoo, owned by whoever drives the session.
#[derive(Debug, Clone, Serialize)]
pub struct Zoo {
    pub(crate) name: String,
    pub(crate) money: i64,
    pub(crate) food: i64,
    pub(crate) popularity: i64,
    pub(crate) day: u32,
    pub(crate) animals_bought_today: u32,
    pub(crate) enclosures: Vec<Enclosure>,
    pub(crate) employees: Vec<Employee>,
    pub(crate) market: Market,
    pub(crate) daily_events: Vec<String>,
    #[serde(skip)]
    pub(crate) rules: Rules,
}

impl Zoo {
    /// Day 1, no food, no enclosures, a director on staff and a fresh market.
    pub fn new<R: RandomSource + ?Sized>(
        name: impl Into<String>,
        initial_money: i64,
        director_name: impl Into<String>,
        rules: Rules,
        rng: &mut R,
    ) -> Result<Self, ZooError> {
        if initial_money < 0 {
            return Err(ZooError::InvalidAmount(initial_money));
        }
        Ok(Self {
            name: name.into(),
            money: initial_money,
            food: 0,
            popularity: rules.starting_popularity,
            day: 1,
            animals_bought_today: 0,
            enclosures: Vec::new(),
            employees: vec![Employee::new(director_name, Role::Director)],
            market: Market::generate(rng),
            daily_events: Vec::new(),
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn food(&self) -> i64 {
        self.food
    }

    pub fn popularity(&self) -> i64 {
        self.popularity
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn animals_bought_today(&self) -> u32 {
        self.animals_bought_today
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    pub fn enclosure(&self, id: EnclosureId) -> Option<&Enclosure> {
        self.enclosures.get(id.0)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Event descriptions for the day most recently resolved.
    pub fn daily_events(&self) -> &[String] {
        &self.daily_events
    }

    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.enclosures.iter().flat_map(|enclosure| enclosure.animals())
    }

    pub fn total_animals(&self) -> usize {
        self.enclosures.iter().map(Enclosure::len).sum()
    }

    pub fn total_infected(&self) -> usize {
        self.enclosures.iter().map(Enclosure::infected_count).sum()
    }

    pub fn visitors(&self) -> i64 {
        2 * self.popularity
    }

    pub fn summary(&self) -> ZooSummary {
        ZooSummary {
            name: self.name.clone(),
            day: self.day,
            money: self.money,
            food: self.food,
            popularity: self.popularity,
            visitors: self.visitors(),
            animals: self.total_animals(),
            infected: self.total_infected(),
            enclosures: self.enclosures.len(),
            employees: self.employees.len(),
        }
    }

    pub fn market_listing(&self) -> Vec<MarketOffer> {
        self.market.offers()
    }

    pub fn enclosure_listing(&self) -> Vec<EnclosureView> {
        self.enclosures
            .iter()
            .enumerate()
            .map(|(index, enclosure)| EnclosureView {
                id: EnclosureId(index),
                climate: enclosure.climate(),
                capacity: enclosure.capacity(),
                level: enclosure.level(),
                daily_cost: enclosure.daily_cost(),
                upgrade_cost: (enclosure.level() < MAX_LEVEL).then(|| enclosure.upgrade_cost()),
                animals: enclosure
                    .animals()
                    .iter()
                    .enumerate()
                    .map(|(index, animal)| AnimalView::new(index, animal))
                    .collect(),
            })
            .collect()
    }

    /// First market index whose animal the enclosure would accept right now.
    pub fn first_compatible_offer(&self, enclosure: EnclosureId) -> Option<usize> {
        let target = self.enclosure(enclosure)?;
        self.market
            .animals()
            .iter()
            .position(|animal| target.check_placement(animal).is_ok())
    }

    fn purchase_limit_reached(&self) -> bool {
        !self.rules.market_is_free(self.day)
            && self.animals_bought_today >= self.rules.daily_purchase_limit
    }

    fn enclosure_mut(&mut self, id: EnclosureId) -> Result<&mut Enclosure, ZooError> {
        self.enclosures
            .get_mut(id.0)
            .ok_or(ZooError::NoSuchEnclosure(id))
    }

    pub fn buy_animal(
        &mut self,
        market_index: usize,
        name: &str,
        enclosure: EnclosureId,
    ) -> Result<Animal, ZooError> {
        if self.purchase_limit_reached() {
            return Err(ZooError::DailyLimitReached);
        }
        let candidate = self
            .market
            .get(market_index)
            .ok_or(ZooError::InvalidIndex(market_index))?;
        let price = valuation::price(candidate);
        ZooError::funds(price, self.money)?;
        let target = self
            .enclosure(enclosure)
            .ok_or(ZooError::NoSuchEnclosure(enclosure))?;
        target.check_placement(candidate)?;

        let mut animal = self
            .market
            .take(market_index)
            .ok_or(ZooError::InvalidIndex(market_index))?;
        animal.name = name.trim().to_string();
        if animal.name.is_empty() {
            animal.name = animal.species.clone();
        }
        self.enclosure_mut(enclosure)?.add_animal(animal.clone())?;
        self.money -= price;
        self.animals_bought_today += 1;
        info!(
            target: "zoo",
            animal = %animal.name,
            species = %animal.species,
            price,
            enclosure = %enclosure,
            "animal bought"
        );
        Ok(animal)
    }

    /// Removes the animal and credits its sell value.
    pub fn sell_animal(
        &mut self,
        enclosure: EnclosureId,
        animal_index: usize,
    ) -> Result<i64, ZooError> {
        let pen = self
            .enclosures
            .get_mut(enclosure.0)
            .ok_or(ZooError::NotFound)?;
        let animal = pen.remove_at(animal_index).ok_or(ZooError::NotFound)?;
        let value = valuation::sell_value(&animal);
        self.money += value;
        info!(target: "zoo", animal = %animal.name, value, "animal sold");
        Ok(value)
    }

    /// Cures the first animal carrying this name, searching enclosures in build order.
    pub fn cure_animal(&mut self, name: &str) -> Result<(), ZooError> {
        let cost = self.rules.cure_cost;
        let available = self.money;
        let animal = self
            .enclosures
            .iter_mut()
            .flat_map(|enclosure| enclosure.animals.iter_mut())
            .find(|animal| animal.name == name)
            .ok_or(ZooError::NotFound)?;
        if !animal.is_infected() {
            return Err(ZooError::NotInfected(animal.name.clone()));
        }
        ZooError::funds(cost, available)?;
        animal.health = Health::Healthy;
        self.money -= cost;
        info!(target: "zoo", animal = name, cost, "animal cured");
        Ok(())
    }

    /// The chosen indices are validated, but the parents are always the first
    /// eligible pair of the enclosure.
    pub fn breed_in_enclosure<R: RandomSource + ?Sized>(
        &mut self,
        enclosure: EnclosureId,
        first: usize,
        second: usize,
        offspring_names: &[String],
        rng: &mut R,
    ) -> Result<Vec<Animal>, ZooError> {
        let pen = self.enclosure_mut(enclosure)?;
        if pen.len() < 2 {
            return Err(ZooError::TooFewAnimals);
        }
        for index in [first, second] {
            if index >= pen.len() {
                return Err(ZooError::InvalidIndex(index));
            }
        }
        if first == second {
            return Err(ZooError::InvalidIndex(second));
        }
        let born = pen.breed_animals(offspring_names, rng)?;
        for child in &born {
            info!(
                target: "zoo",
                name = %child.name,
                species = %child.species,
                parents = %child.parents_label(),
                "animal born"
            );
        }
        Ok(born)
    }

    pub fn rename_animal(
        &mut self,
        enclosure: EnclosureId,
        animal_index: usize,
        new_name: &str,
    ) -> Result<(), ZooError> {
        let animal = self
            .enclosures
            .get_mut(enclosure.0)
            .and_then(|pen| pen.animal_mut(animal_index))
            .ok_or(ZooError::NotFound)?;
        let previous = std::mem::replace(&mut animal.name, new_name.trim().to_string());
        info!(target: "zoo", from = %previous, to = %animal.name, "animal renamed");
        Ok(())
    }

    pub fn build_enclosure(
        &mut self,
        climate: Climate,
        capacity: u32,
    ) -> Result<EnclosureId, ZooError> {
        if capacity == 0 {
            return Err(ZooError::InvalidAmount(0));
        }
        let cost = valuation::enclosure_construction_cost(climate, capacity);
        ZooError::funds(cost, self.money)?;
        self.money -= cost;
        self.enclosures.push(Enclosure::new(climate, capacity));
        let id = EnclosureId(self.enclosures.len() - 1);
        info!(target: "zoo", enclosure = %id, %climate, capacity, cost, "enclosure built");
        Ok(id)
    }

    pub fn upgrade_enclosure(&mut self, enclosure: EnclosureId) -> Result<u8, ZooError> {
        let available = self.money;
        let pen = self.enclosure_mut(enclosure)?;
        if pen.level() >= MAX_LEVEL {
            return Err(ZooError::MaxLevelReached);
        }
        let cost = pen.upgrade_cost();
        ZooError::funds(cost, available)?;
        let level = pen.upgrade()?;
        let capacity = pen.capacity();
        self.money -= cost;
        info!(target: "zoo", enclosure = %enclosure, level, capacity, cost, "enclosure upgraded");
        Ok(level)
    }

    /// Hiring pays the first salary up front.
    pub fn hire_employee(&mut self, name: &str, role: &str) -> Result<Employee, ZooError> {
        let role = role
            .parse::<Role>()
            .map_err(|UnknownRole(label)| ZooError::UnknownRole(label))?;
        if role.is_protected() {
            return Err(ZooError::ProtectedRole);
        }
        let employee = Employee::new(name.trim(), role);
        ZooError::funds(employee.salary, self.money)?;
        self.money -= employee.salary;
        self.employees.push(employee.clone());
        info!(target: "zoo", name = %employee.name, %role, salary = employee.salary, "employee hired");
        Ok(employee)
    }

    pub fn fire_employee(&mut self, index: usize) -> Result<Employee, ZooError> {
        let employee = self
            .employees
            .get(index)
            .ok_or(ZooError::InvalidIndex(index))?;
        if employee.role.is_protected() {
            return Err(ZooError::ProtectedRole);
        }
        let employee = self.employees.remove(index);
        info!(target: "zoo", name = %employee.name, role = %employee.role, "employee fired");
        Ok(employee)
    }

    pub fn buy_food(&mut self, kg: i64) -> Result<(), ZooError> {
        if kg <= 0 {
            return Err(ZooError::InvalidAmount(kg));
        }
        let cost = kg.saturating_mul(self.rules.food_price_per_kg);
        ZooError::funds(cost, self.money)?;
        self.money -= cost;
        self.food += kg;
        info!(target: "zoo", kg, cost, stock = self.food, "food bought");
        Ok(())
    }

    /// Returns the popularity gained.
    pub fn run_advertising(&mut self, spend: i64) -> Result<i64, ZooError> {
        if spend <= 0 {
            return Err(ZooError::InvalidAmount(spend));
        }
        ZooError::funds(spend, self.money)?;
        let gained = spend / self.rules.advertising_cost_per_point.max(1);
        self.money -= spend;
        self.popularity += gained;
        info!(target: "zoo", spend, gained, popularity = self.popularity, "advertising campaign");
        Ok(gained)
    }

    pub fn refresh_market<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), ZooError> {
        let cost = if self.rules.market_is_free(self.day) {
            0
        } else {
            self.rules.market_refresh_cost
        };
        ZooError::funds(cost, self.money)?;
        self.money -= cost;
        self.market.regenerate(rng);
        info!(target: "zoo", cost, "market refreshed");
        Ok(())
    }

    /// Start of the day cycle: yesterday's events go, the purchase allowance comes back.
    pub(crate) fn begin_day(&mut self) {
        self.daily_events.clear();
        self.animals_bought_today = 0;
    }

    pub(crate) fn record_event(&mut self, description: impl Into<String>) {
        self.daily_events.push(description.into());
    }

    pub(crate) fn adjust_popularity(&mut self, delta: i64) {
        self.popularity = (self.popularity + delta).max(0);
    }

    pub(crate) fn advance_calendar(&mut self) {
        self.day += 1;
    }
}
