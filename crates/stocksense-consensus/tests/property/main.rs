mod consensus_properties;
