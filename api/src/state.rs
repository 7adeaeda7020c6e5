use app::store::Store;

pub struct RocketState {
    pub store: Store,
}
