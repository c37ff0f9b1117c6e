pub mod configuration;

pub mod chart {
    pub mod charterror;
    pub mod figure;
    pub mod renderer;
}

pub mod demo {
    pub mod demo;
    pub mod bernoullidistribution;
    pub mod logbernoulli;
    pub mod derivativecomparison;
    pub mod bernoullientropy;
    pub mod negativexlogx;
    pub mod logbasecomparison;
    pub mod exponentialfunction;
    pub mod compoundlimit;
    pub mod compoundinterest;
    pub mod sigmoidfunctions;
    pub mod sigmoidsaturation;
    pub mod gradientdescentmonitor;
}

pub mod interestrate {
    pub mod compounding;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod bernoulli;
        pub mod entropy;
        pub mod logistic;
        pub mod exponential;
    }
    pub mod grid;
    pub mod series;
}

pub mod optimize {
    pub mod objective;
    pub mod fixedstepdescent;
}
