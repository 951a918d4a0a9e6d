use domain::palette::Palette;

pub trait PaletteQueryUseCase: Send + Sync {
    fn palette(&self) -> Palette;
}
