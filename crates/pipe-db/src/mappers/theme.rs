//! Theme model -> entity mapper

use pipe_core::entities::Theme;

use crate::models::ThemeModel;

/// Convert ThemeModel to Theme entity
impl From<ThemeModel> for Theme {
    fn from(model: ThemeModel) -> Self {
        Theme::new(model.id, model.user_id, model.dark_mode)
    }
}
