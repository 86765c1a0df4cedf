// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The catalog of metric names a comparison query may project.
//!
//! `query_type` resolves through this fixed mapping instead of indexing the
//! record by an arbitrary string, so a misspelled metric name fails
//! validation up front instead of returning all-zero rows.

use super::MetricRecord;

/// A numeric column of [`MetricRecord`] that can be projected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalCases,
    NewCases,
    TotalDeaths,
    NewDeaths,
    TotalCasesPerMillion,
    NewCasesPerMillion,
    TotalDeathsPerMillion,
    NewDeathsPerMillion,
    StringencyIndex,
    PopulationDensity,
    MedianAge,
    Aged65Older,
    Aged70Older,
    GdpPerCapita,
    ExtremePoverty,
    CardiovascDeathRate,
    DiabetesPrevalence,
    FemaleSmokers,
    MaleSmokers,
    HospitalBedsPerThousand,
    LifeExpectancy,
    HumanDevelopmentIndex,
    Population,
    PeopleVaccinatedPerHundred,
    ExcessMortalityCumulativeAbsolute,
    ExcessMortalityCumulative,
    ExcessMortality,
    ExcessMortalityCumulativePerMillion,
}

impl Metric {
    /// Resolve a raw `query_type` value, or `None` for unknown names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "total_cases" => Some(Self::TotalCases),
            "new_cases" => Some(Self::NewCases),
            "total_deaths" => Some(Self::TotalDeaths),
            "new_deaths" => Some(Self::NewDeaths),
            "total_cases_per_million" => Some(Self::TotalCasesPerMillion),
            "new_cases_per_million" => Some(Self::NewCasesPerMillion),
            "total_deaths_per_million" => Some(Self::TotalDeathsPerMillion),
            "new_deaths_per_million" => Some(Self::NewDeathsPerMillion),
            "stringency_index" => Some(Self::StringencyIndex),
            "population_density" => Some(Self::PopulationDensity),
            "median_age" => Some(Self::MedianAge),
            "aged_65_older" => Some(Self::Aged65Older),
            "aged_70_older" => Some(Self::Aged70Older),
            "gdp_per_capita" => Some(Self::GdpPerCapita),
            "extreme_poverty" => Some(Self::ExtremePoverty),
            "cardiovasc_death_rate" => Some(Self::CardiovascDeathRate),
            "diabetes_prevalence" => Some(Self::DiabetesPrevalence),
            "female_smokers" => Some(Self::FemaleSmokers),
            "male_smokers" => Some(Self::MaleSmokers),
            "hospital_beds_per_thousand" => Some(Self::HospitalBedsPerThousand),
            "life_expectancy" => Some(Self::LifeExpectancy),
            "human_development_index" => Some(Self::HumanDevelopmentIndex),
            "population" => Some(Self::Population),
            "people_vaccinated_per_hundred" => Some(Self::PeopleVaccinatedPerHundred),
            "excess_mortality_cumulative_absolute" => {
                Some(Self::ExcessMortalityCumulativeAbsolute)
            }
            "excess_mortality_cumulative" => Some(Self::ExcessMortalityCumulative),
            "excess_mortality" => Some(Self::ExcessMortality),
            "excess_mortality_cumulative_per_million" => {
                Some(Self::ExcessMortalityCumulativePerMillion)
            }
            _ => None,
        }
    }

    /// The column name as stored in the dataset collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalCases => "total_cases",
            Self::NewCases => "new_cases",
            Self::TotalDeaths => "total_deaths",
            Self::NewDeaths => "new_deaths",
            Self::TotalCasesPerMillion => "total_cases_per_million",
            Self::NewCasesPerMillion => "new_cases_per_million",
            Self::TotalDeathsPerMillion => "total_deaths_per_million",
            Self::NewDeathsPerMillion => "new_deaths_per_million",
            Self::StringencyIndex => "stringency_index",
            Self::PopulationDensity => "population_density",
            Self::MedianAge => "median_age",
            Self::Aged65Older => "aged_65_older",
            Self::Aged70Older => "aged_70_older",
            Self::GdpPerCapita => "gdp_per_capita",
            Self::ExtremePoverty => "extreme_poverty",
            Self::CardiovascDeathRate => "cardiovasc_death_rate",
            Self::DiabetesPrevalence => "diabetes_prevalence",
            Self::FemaleSmokers => "female_smokers",
            Self::MaleSmokers => "male_smokers",
            Self::HospitalBedsPerThousand => "hospital_beds_per_thousand",
            Self::LifeExpectancy => "life_expectancy",
            Self::HumanDevelopmentIndex => "human_development_index",
            Self::Population => "population",
            Self::PeopleVaccinatedPerHundred => "people_vaccinated_per_hundred",
            Self::ExcessMortalityCumulativeAbsolute => "excess_mortality_cumulative_absolute",
            Self::ExcessMortalityCumulative => "excess_mortality_cumulative",
            Self::ExcessMortality => "excess_mortality",
            Self::ExcessMortalityCumulativePerMillion => {
                "excess_mortality_cumulative_per_million"
            }
        }
    }

    /// Read this metric's value from a record.
    pub fn value_of(&self, record: &MetricRecord) -> Option<f64> {
        match self {
            Self::TotalCases => record.total_cases,
            Self::NewCases => record.new_cases,
            Self::TotalDeaths => record.total_deaths,
            Self::NewDeaths => record.new_deaths,
            Self::TotalCasesPerMillion => record.total_cases_per_million,
            Self::NewCasesPerMillion => record.new_cases_per_million,
            Self::TotalDeathsPerMillion => record.total_deaths_per_million,
            Self::NewDeathsPerMillion => record.new_deaths_per_million,
            Self::StringencyIndex => record.stringency_index,
            Self::PopulationDensity => record.population_density,
            Self::MedianAge => record.median_age,
            Self::Aged65Older => record.aged_65_older,
            Self::Aged70Older => record.aged_70_older,
            Self::GdpPerCapita => record.gdp_per_capita,
            Self::ExtremePoverty => record.extreme_poverty,
            Self::CardiovascDeathRate => record.cardiovasc_death_rate,
            Self::DiabetesPrevalence => record.diabetes_prevalence,
            Self::FemaleSmokers => record.female_smokers,
            Self::MaleSmokers => record.male_smokers,
            Self::HospitalBedsPerThousand => record.hospital_beds_per_thousand,
            Self::LifeExpectancy => record.life_expectancy,
            Self::HumanDevelopmentIndex => record.human_development_index,
            Self::Population => record.population,
            Self::PeopleVaccinatedPerHundred => record.people_vaccinated_per_hundred,
            Self::ExcessMortalityCumulativeAbsolute => {
                record.excess_mortality_cumulative_absolute
            }
            Self::ExcessMortalityCumulative => record.excess_mortality_cumulative,
            Self::ExcessMortality => record.excess_mortality,
            Self::ExcessMortalityCumulativePerMillion => {
                record.excess_mortality_cumulative_per_million
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(Metric::parse("total_cases"), Some(Metric::TotalCases));
        assert_eq!(
            Metric::parse("people_vaccinated_per_hundred"),
            Some(Metric::PeopleVaccinatedPerHundred)
        );
        assert_eq!(Metric::parse("gdp_per_capita"), Some(Metric::GdpPerCapita));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(Metric::parse("total_case"), None);
        assert_eq!(Metric::parse(""), None);
        assert_eq!(Metric::parse("location"), None);
    }

    #[test]
    fn as_str_round_trips() {
        let metric = Metric::parse("aged_65_older").unwrap();
        assert_eq!(metric.as_str(), "aged_65_older");
    }

    #[test]
    fn value_of_reads_the_matching_column() {
        let record = MetricRecord {
            total_cases: Some(42.0),
            ..MetricRecord::default()
        };
        assert_eq!(Metric::TotalCases.value_of(&record), Some(42.0));
        assert_eq!(Metric::TotalDeaths.value_of(&record), None);
    }
}
