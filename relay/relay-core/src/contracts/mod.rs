macro_rules! muse {
    ($module:ident, {$($item:ident),* $(,)?}) => {
        pub mod $module;
        pub use $module::{ $($item),* };
    };
}

muse!(generation_parameters, {GenerationParameters});
muse!(generation_request, {GenerationRequest});
