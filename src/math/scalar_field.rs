// src/math/scalar_field.rs

use bevy::math::Vec2;

/// Trait für ein zweidimensionales Skalarfeld auf einem regelmäßigen Gitter.
/// Ermöglicht es Algorithmen wie Marching Squares, auf verschiedenen
/// Feldimplementierungen zu operieren.
pub trait ScalarField2D {
    /// Anzahl der Gitterpunkte in x-Richtung.
    fn width(&self) -> usize;

    /// Anzahl der Gitterpunkte in y-Richtung.
    fn height(&self) -> usize;

    /// Abstand benachbarter Gitterpunkte in Weltkoordinaten.
    fn cell_size(&self) -> f32;

    /// Weltkoordinate des Gitterpunkts (0, 0).
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Gibt den Skalarwert am Gitterpunkt (x_idx, y_idx) zurück.
    /// Sollte 0.0 zurückgeben, wenn die Koordinaten außerhalb der Grenzen liegen.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32;

    /// Konvertiert einen Gitterindex in Weltkoordinaten.
    fn cell_to_world(&self, x_idx: usize, y_idx: usize) -> Vec2 {
        self.origin()
            + Vec2::new(
                x_idx as f32 * self.cell_size(),
                y_idx as f32 * self.cell_size(),
            )
    }
}
