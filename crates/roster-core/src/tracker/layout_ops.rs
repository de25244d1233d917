//! Dashboard layout operations for the Tracker.
//!
//! The layout is read from the `settings` table on every call. Edits load
//! and save it under one write lock, so concurrent edits apply in turn.

use super::Tracker;
use crate::{
    config::DashboardLayout,
    error::Result,
    params::{MoveWidget, WidgetRef},
};

impl Tracker {
    /// The saved dashboard layout, or the default one.
    pub async fn layout(&self) -> Result<DashboardLayout> {
        self.with_db(|db| DashboardLayout::load(&*db)).await
    }

    /// Moves a widget and saves the layout.
    pub async fn move_widget(&self, params: &MoveWidget) -> Result<DashboardLayout> {
        let widget = params.widget()?;
        let position = params.position;
        self.edit_layout(move |layout| layout.move_widget(widget, position))
            .await
    }

    /// Shows or hides a widget and saves the layout.
    pub async fn toggle_widget(&self, params: &WidgetRef) -> Result<DashboardLayout> {
        let widget = params.widget()?;
        self.edit_layout(move |layout| layout.toggle(widget).map(drop))
            .await
    }

    /// Restores the default layout and saves it.
    pub async fn reset_layout(&self) -> Result<DashboardLayout> {
        self.edit_layout(|layout| {
            layout.reset();
            Ok(())
        })
        .await
    }

    async fn edit_layout<F>(&self, edit: F) -> Result<DashboardLayout>
    where
        F: FnOnce(&mut DashboardLayout) -> Result<()> + Send + 'static,
    {
        self.with_db(move |db| {
            db.with_write_lock(|db| {
                let mut layout = DashboardLayout::load(&*db)?;
                edit(&mut layout)?;
                layout.save(db)?;
                Ok(layout)
            })
        })
        .await
    }
}
