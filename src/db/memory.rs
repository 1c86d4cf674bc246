//! In-process event store, used for dry runs and tests.

use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::column::ColumnKey;
use crate::models::table::WideTable;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Grid {
    columns: Vec<(String, Vec<Option<String>>)>,
    rows: usize,
}

impl Grid {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    fn grow(&mut self, rows: usize) {
        if rows > self.rows {
            self.rows = rows;
        }
        for (_, cells) in &mut self.columns {
            cells.resize(self.rows, None);
        }
    }

    fn add(&mut self, name: &str) -> usize {
        self.columns.push((name.to_string(), vec![None; self.rows]));
        self.columns.len() - 1
    }

    fn fill(&mut self, idx: usize, values: &[String]) {
        self.grow(values.len());
        let cells = &mut self.columns[idx].1;
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = values
                .get(i)
                .filter(|v| !v.trim().is_empty())
                .cloned();
        }
    }
}

/// The whole grid sits behind one mutex, held for the full
/// read-modify-write of every operation.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    grid: Mutex<Grid>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Grid>> {
        self.grid
            .lock()
            .map_err(|_| AppError::Other("event store mutex poisoned".into()))
    }
}

impl EventStore for MemoryEventStore {
    fn create_column(&self, key: &ColumnKey) -> AppResult<()> {
        let name = key.column_name();
        let mut grid = self.lock()?;
        if grid.index_of(&name).is_some() {
            return Err(AppError::DuplicateColumn(name));
        }
        grid.add(&name);
        Ok(())
    }

    fn write_column(&self, key: &ColumnKey, values: &[String]) -> AppResult<()> {
        let name = key.column_name();
        let mut grid = self.lock()?;
        let idx = grid.index_of(&name).ok_or(AppError::UnknownColumn(name))?;
        grid.fill(idx, values);
        Ok(())
    }

    fn create_column_with(&self, key: &ColumnKey, values: &[String]) -> AppResult<()> {
        let name = key.column_name();
        let mut grid = self.lock()?;
        if grid.index_of(&name).is_some() {
            return Err(AppError::DuplicateColumn(name));
        }
        let idx = grid.add(&name);
        grid.fill(idx, values);
        Ok(())
    }

    fn append_or_fill(&self, key: &ColumnKey, value: &str) -> AppResult<usize> {
        let name = key.column_name();
        let mut grid = self.lock()?;

        let idx = match grid.index_of(&name) {
            Some(i) => i,
            None => grid.add(&name),
        };

        let row = match grid.columns[idx].1.iter().position(Option::is_none) {
            Some(r) => r,
            None => {
                let r = grid.rows;
                grid.grow(r + 1);
                r
            }
        };

        grid.columns[idx].1[row] = Some(value.to_string());
        Ok(row)
    }

    fn read_all(&self) -> AppResult<WideTable> {
        let grid = self.lock()?;
        let mut table = WideTable::new();
        for (name, cells) in &grid.columns {
            table.push_column(name.clone(), cells.clone());
        }
        Ok(table)
    }

    fn drop_all(&self) -> AppResult<()> {
        *self.lock()? = Grid::default();
        Ok(())
    }

    fn replace_all(&self, table: &WideTable) -> AppResult<()> {
        let mut next = Grid::default();
        for col in &table.columns {
            if next.index_of(&col.name).is_some() {
                return Err(AppError::DuplicateColumn(col.name.clone()));
            }
            let idx = next.add(&col.name);
            next.grow(col.cells.len());
            next.columns[idx].1 = col.cells.clone();
            next.grow(0);
        }
        next.grow(table.row_count());

        *self.lock()? = next;
        Ok(())
    }
}
