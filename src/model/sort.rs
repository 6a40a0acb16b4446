use serde::{Deserialize, Serialize};

/// A column that a table can be sorted by.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Day,
    Month,
    Channel,
    Yen,
}

serde_plain::derive_display_from_serialize!(Column);
serde_plain::derive_fromstr_from_deserialize!(Column);

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

serde_plain::derive_display_from_serialize!(Order);
serde_plain::derive_fromstr_from_deserialize!(Order);

impl Order {
    pub fn flipped(self) -> Self {
        match self {
            Order::Asc => Order::Desc,
            Order::Desc => Order::Asc,
        }
    }
}

/// How a single table is sorted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub(crate) column: Column,
    pub(crate) order: Order,
}

impl SortSpec {
    pub const fn new(column: Column, order: Order) -> Self {
        Self { column, order }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Applies a header click: the sorted column flips its order, any other column becomes the
    /// sorted column in ascending order.
    pub fn toggle(&mut self, column: Column) {
        if self.column == column {
            self.order = self.order.flipped();
        } else {
            self.column = column;
            self.order = Order::Asc;
        }
    }
}

/// Identifies one of the four tables shown by the viewer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// The filtered records themselves.
    Base,
    Day,
    Month,
    Channel,
}

serde_plain::derive_display_from_serialize!(Table);
serde_plain::derive_fromstr_from_deserialize!(Table);

/// One `SortSpec` per table, each mutated independently.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Sorts {
    pub(crate) base: SortSpec,
    pub(crate) day: SortSpec,
    pub(crate) month: SortSpec,
    pub(crate) channel: SortSpec,
}

impl Default for Sorts {
    fn default() -> Self {
        Self {
            base: SortSpec::new(Column::Day, Order::Desc),
            day: SortSpec::new(Column::Day, Order::Asc),
            month: SortSpec::new(Column::Month, Order::Asc),
            channel: SortSpec::new(Column::Yen, Order::Desc),
        }
    }
}

impl Sorts {
    pub fn get(&self, table: Table) -> &SortSpec {
        match table {
            Table::Base => &self.base,
            Table::Day => &self.day,
            Table::Month => &self.month,
            Table::Channel => &self.channel,
        }
    }

    pub fn get_mut(&mut self, table: Table) -> &mut SortSpec {
        match table {
            Table::Base => &mut self.base,
            Table::Day => &mut self.day,
            Table::Month => &mut self.month,
            Table::Channel => &mut self.channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_column_flips() {
        let mut spec = SortSpec::new(Column::Yen, Order::Desc);
        spec.toggle(Column::Yen);
        assert_eq!(spec, SortSpec::new(Column::Yen, Order::Asc));
        spec.toggle(Column::Yen);
        assert_eq!(spec, SortSpec::new(Column::Yen, Order::Desc));
    }

    #[test]
    fn test_toggle_new_column_is_ascending() {
        let mut spec = SortSpec::new(Column::Day, Order::Desc);
        spec.toggle(Column::Channel);
        assert_eq!(spec, SortSpec::new(Column::Channel, Order::Asc));
    }

    #[test]
    fn test_sorts_are_independent() {
        let mut sorts = Sorts::default();
        sorts.get_mut(Table::Month).toggle(Column::Yen);
        assert_eq!(sorts.month, SortSpec::new(Column::Yen, Order::Asc));
        assert_eq!(sorts.get(Table::Base), &Sorts::default().base);
    }

    #[test]
    fn test_plain_names() {
        assert_eq!(Column::Channel.to_string(), "channel");
        assert_eq!("desc".parse::<Order>().unwrap(), Order::Desc);
        assert_eq!("base".parse::<Table>().unwrap(), Table::Base);
    }
}
